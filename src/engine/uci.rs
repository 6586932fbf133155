use super::{extract_move_token, EngineError, EngineResult, Score, SearchReply, SearchRequest};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

/// Read the score out of an `info` line, if it carries one
pub fn parse_info_score(line: &str) -> Option<Score> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "info" {
        return None;
    }
    while let Some(word) = parts.next() {
        if word == "score" {
            let kind = parts.next()?;
            let value: i32 = parts.next()?.parse().ok()?;
            return match kind {
                "cp" => Some(Score::Centipawns(value)),
                "mate" => Some(Score::MateIn(value)),
                _ => None,
            };
        }
    }
    None
}

/// UCI conversation with an engine over any async reader/writer pair
pub struct UciSession<R, W> {
    lines: Lines<BufReader<R>>,
    writer: W,
    timeout: Duration,
}

impl<R, W> UciSession<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, timeout: Duration) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
            timeout,
        }
    }

    pub async fn send(&mut self, command: &str) -> EngineResult<()> {
        debug!("engine >> {}", command);
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn next_line(&mut self) -> EngineResult<String> {
        match self.lines.next_line().await? {
            Some(line) => {
                trace!("engine << {}", line);
                Ok(line)
            }
            None => Err(EngineError::Protocol(
                "engine closed its output".to_string(),
            )),
        }
    }

    async fn wait_for(&mut self, expected: &str) -> EngineResult<()> {
        let limit = self.timeout;
        timeout(limit, async {
            loop {
                if self.next_line().await?.trim() == expected {
                    return Ok::<(), EngineError>(());
                }
            }
        })
        .await
        .map_err(|_| EngineError::Timeout(limit))?
    }

    /// `uci` / `uciok`, then `isready` / `readyok`
    pub async fn handshake(&mut self) -> EngineResult<()> {
        self.send("uci").await?;
        self.wait_for("uciok").await?;
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    /// Search `request.fen` to `request.depth` and return the best move
    pub async fn search(&mut self, request: &SearchRequest) -> EngineResult<SearchReply> {
        self.send(&format!("position fen {}", request.fen)).await?;
        self.send(&request.go_command()).await?;

        let limit = self.timeout;
        let (token, score) = timeout(limit, async {
            let mut score = None;
            loop {
                let line = self.next_line().await?;
                if let Some(s) = parse_info_score(&line) {
                    score = Some(s);
                } else if line.starts_with("bestmove") {
                    let token = extract_move_token(&line)
                        .ok_or(EngineError::NoMove)?
                        .to_string();
                    return Ok::<_, EngineError>((token, score));
                }
            }
        })
        .await
        .map_err(|_| EngineError::Timeout(limit))??;

        Ok(SearchReply {
            fen: request.fen.clone(),
            best_move: token.parse()?,
            score,
        })
    }
}

/// A UCI engine running as a child process
pub struct UciEngine {
    child: Child,
    session: UciSession<ChildStdout, ChildStdin>,
}

impl UciEngine {
    /// Start the engine binary and complete the UCI handshake
    pub async fn spawn(path: &Path, search_timeout: Duration) -> EngineResult<Self> {
        info!("Starting engine {}", path.display());
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(EngineError::Spawn)?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Protocol("engine stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Protocol("engine stdout unavailable".to_string()))?;

        let mut session = UciSession::new(stdout, stdin, search_timeout);
        session.handshake().await?;

        Ok(Self { child, session })
    }

    pub async fn search(&mut self, request: &SearchRequest) -> EngineResult<SearchReply> {
        self.session.search(request).await
    }

    /// Ask the engine to exit, killing it if it does not
    pub async fn quit(mut self) {
        if let Err(e) = self.session.send("quit").await {
            warn!("Failed to send quit to engine: {}", e);
        }
        if timeout(Duration::from_secs(2), self.child.wait()).await.is_err() {
            warn!("Engine did not exit, killing it");
            let _ = self.child.kill().await;
        }
    }
}
