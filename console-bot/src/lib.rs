use bot_utils::{
    bots::{async_trait, Bot, BotBuilder, BotExit},
    ClientUtils, CommandResult, StopListener,
};
use tokio::{
    io::{stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader, Stdin, Stdout},
    sync::watch,
};

mod handler;
pub use handler::reply_text;

/// One line of input, numbered so replies can point back at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub content: String,
}

/// Why `serve` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Closed,
    Restart,
}

/// Treats every input line as a chat message and writes replies as
/// `[#<id>] <text>`.
pub struct ConsoleBot<R, W> {
    reader: R,
    writer: W,
    utils: ClientUtils,
    stop: watch::Receiver<bool>,
}

impl<R, W> ConsoleBot<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn serve(&mut self) -> Session {
        let mut lines = (&mut self.reader).lines();
        let mut next_id: u64 = 1;
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line,
                _ = self.stop.wait_stop() => {
                    log::info!("stop requested");
                    return Session::Closed;
                }
            };
            let content = match line {
                Ok(Some(content)) => content,
                Ok(None) => {
                    log::info!("input closed");
                    return Session::Closed;
                }
                Err(err) => {
                    log::error!("unable to read message: {}", err);
                    return Session::Closed;
                }
            };
            let message = Message {
                id: next_id,
                content,
            };
            next_id += 1;
            if let Some(response) = self.utils.eval(&message.content).await {
                let ending = match response {
                    CommandResult::Kill => Some(Session::Closed),
                    CommandResult::Restart => Some(Session::Restart),
                    _ => None,
                };
                handler::respond(&mut self.writer, &message, response).await;
                if let Some(ending) = ending {
                    log::info!("{:?} requested by message {}", ending, message.id);
                    return ending;
                }
            }
        }
    }
}

#[async_trait]
impl<R, W> Bot for ConsoleBot<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    type Builder = ConsoleBotBuilder<R, W>;

    async fn run(mut self) -> BotExit<Self::Builder> {
        log::info!("console bot listening as {}", self.utils.nick());
        let session = self.serve().await;
        log::info!("console bot stopped");
        match session {
            Session::Closed => BotExit::Stopped,
            Session::Restart => BotExit::Restart(ConsoleBotBuilder::with_io(self.reader, self.writer)),
        }
    }
}

pub struct ConsoleBotBuilder<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleBotBuilder<BufReader<Stdin>, Stdout> {
    pub fn new() -> Self {
        ConsoleBotBuilder {
            reader: BufReader::new(stdin()),
            writer: stdout(),
        }
    }
}

impl Default for ConsoleBotBuilder<BufReader<Stdin>, Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, W> ConsoleBotBuilder<R, W> {
    pub fn with_io(reader: R, writer: W) -> Self {
        ConsoleBotBuilder { reader, writer }
    }
}

#[async_trait]
impl<R, W> BotBuilder for ConsoleBotBuilder<R, W>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    type B = ConsoleBot<R, W>;

    async fn build<S: StopListener>(self, utils: ClientUtils, mut stop: S) -> Self::B {
        let (stop_sender, stop_receiver) = watch::channel(false);
        tokio::task::spawn(async move {
            stop.wait_stop().await;
            let _ = stop_sender.send(true);
        });
        ConsoleBot {
            reader: self.reader,
            writer: self.writer,
            utils,
            stop: stop_receiver,
        }
    }
}
