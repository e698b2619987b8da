use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Serving posts tools over stdio (API: {})", global.api_url);
        eprintln!();
    }

    let handled = serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &global).await?;
    log::info!("stdin closed after {handled} messages");

    Ok(())
}

/// Answer newline-delimited JSON-RPC messages until `reader` hits EOF
///
/// Returns the number of messages read. Blank lines are skipped and
/// notifications produce no output line.
async fn serve<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();
    let mut handled = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break; // EOF
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        handled += 1;
        log::trace!("received: {message}");

        let Some(response) = super::handle_request(message, global).await else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;
        log::trace!("sending: {response_json}");

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(handled)
}
