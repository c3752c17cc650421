//! JSON-lines transport for host editors.
//!
//! One request per input line, one response per output line. Responses are
//! written in completion order, which need not match request order.

use super::backend::Backend;
use crate::kernel::protocol::{Request, Response};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Serve `reader` until it is exhausted and every accepted request has been
/// answered. Returns the writer.
pub async fn serve<R, W>(backend: Arc<Backend>, reader: R, mut writer: W) -> io::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let mut tasks = JoinSet::new();
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Request>(&line) {
                    Ok(request) => {
                        let backend = backend.clone();
                        let tx = tx.clone();
                        tasks.spawn(async move {
                            for response in backend.handle(request).await {
                                let _ = tx.send(response);
                            }
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "rejecting malformed request");
                        let response = Response::Error {
                            data: format!("invalid request: {e}"),
                        };
                        write_response(&mut writer, &response).await?;
                    }
                }
            }
            Some(response) = rx.recv() => {
                write_response(&mut writer, &response).await?;
            }
        }
    }

    drop(tx);
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "request task failed");
        }
    }
    while let Some(response) = rx.recv().await {
        write_response(&mut writer, &response).await?;
    }
    writer.flush().await?;
    tracing::info!("stdio input closed");
    Ok(writer)
}

async fn write_response<W>(writer: &mut W, response: &Response) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line =
        serde_json::to_vec(response).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/stdio.rs"]
mod tests;
