use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use events::{ChatMessage, ClientEvent, Inbound, ServerEvent, UploadResponse};
use futures_util::{SinkExt, StreamExt};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request as WsRequest;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

const UPLOAD_PATH: &str = "/chat/upload";
const AUTOCOMPLETE_PATH: &str = "/autocomplete_search";
const ATTACHMENT_BASE: &str = "/uploads/chat";
const MIN_QUERY_LEN: usize = 2;

type SocketStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("upload rejected: {0}")]
    Rejected(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("cannot read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("namespace connect refused: {0}")]
    Refused(String),
    #[error("packet decode failed: {0}")]
    Decode(#[from] events::CodecError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("timed out waiting for the message echo")]
    Timeout,
    #[error("nothing to send; pass --message or --attach")]
    EmptyMessage,
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Parser, Debug)]
#[command(name = "connecta-cli", about = "Connecta chat, upload and search CLI")]
struct Cli {
    #[arg(long, env = "CONNECTA_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Value of the Flask `session` cookie of a logged-in user.
    #[arg(long, env = "CONNECTA_SESSION")]
    session_cookie: Option<String>,

    #[arg(long, default_value = events::DEFAULT_SOCKET_PATH)]
    socket_path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_cookie: Option<String>,
    socket_path: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    Room(RoomCommand),
    /// Upload a chat attachment and print the stored filename.
    Upload { file: PathBuf },
    /// Print autocomplete suggestions, one per line.
    Search { query: String },
}

#[derive(Args, Debug)]
struct RoomCommand {
    #[command(subcommand)]
    command: RoomSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomSubcommand {
    /// Follow a quote room until Ctrl-C or the server closes.
    Watch {
        #[arg(long)]
        quote_id: String,
        /// Company name to classify messages as sent.
        #[arg(long = "as")]
        as_name: Option<String>,
    },
    /// Post one message (text or attachment) and wait for its echo.
    Send(SendArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    #[arg(long)]
    quote_id: String,

    #[arg(long, conflicts_with = "attach", required_unless_present = "attach")]
    message: Option<String>,

    #[arg(long)]
    attach: Option<PathBuf>,

    #[arg(long = "as")]
    as_name: Option<String>,

    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url.trim_end_matches('/').to_owned(),
        session_cookie: cli.session_cookie,
        socket_path: cli.socket_path,
    };

    match cli.command {
        Command::Room(room) => match room.command {
            RoomSubcommand::Watch { quote_id, as_name } => run_watch(&ctx, &quote_id, as_name.as_deref()).await,
            RoomSubcommand::Send(args) => run_send(&ctx, args).await,
        },
        Command::Upload { file } => {
            let filename = upload_file(&ctx, &file).await?;
            println!("{filename}");
            Ok(())
        }
        Command::Search { query } => {
            for suggestion in search(&ctx, &query).await? {
                println!("{suggestion}");
            }
            Ok(())
        }
    }
}

// =============================================================
// HTTP
// =============================================================

fn session_cookie(value: &str) -> String {
    format!("session={value}")
}

fn http_client(ctx: &CliContext) -> Result<reqwest::Client, CliError> {
    let mut headers = HeaderMap::new();
    if let Some(session) = ctx.session_cookie.as_deref() {
        headers.insert(COOKIE, HeaderValue::from_str(&session_cookie(session))?);
    }
    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}

async fn upload_file(ctx: &CliContext, path: &Path) -> Result<String, CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::ReadFile {
        path: path.to_owned(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    let part = reqwest::multipart::Part::bytes(bytes).file_name(name);
    let form = reqwest::multipart::Form::new().part("file", part);

    let response = http_client(ctx)?
        .post(format!("{}{UPLOAD_PATH}", ctx.base_url))
        .multipart(form)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), %body, "upload response");

    match serde_json::from_str::<UploadResponse>(&body) {
        Ok(UploadResponse::Stored { filename }) => Ok(filename),
        Ok(UploadResponse::Rejected { error }) => Err(CliError::Rejected(error)),
        Err(_) if !status.is_success() => Err(CliError::Status(status.as_u16())),
        Err(e) => Err(e.into()),
    }
}

async fn search(ctx: &CliContext, query: &str) -> Result<Vec<String>, CliError> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }
    let response = http_client(ctx)?
        .get(format!("{}{AUTOCOMPLETE_PATH}", ctx.base_url))
        .query(&[("query", query)])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(CliError::Status(response.status().as_u16()));
    }
    Ok(response.json::<Vec<String>>().await?)
}

// =============================================================
// Socket
// =============================================================

/// Handshake request for `url`, carrying the session cookie when given.
fn ws_request(url: &str, session: Option<&str>) -> Result<WsRequest, CliError> {
    let mut request = url.into_client_request()?;
    if let Some(session) = session {
        request.headers_mut().insert(COOKIE, HeaderValue::from_str(&session_cookie(session))?);
    }
    Ok(request)
}

async fn open_socket(ctx: &CliContext) -> Result<SocketStream, CliError> {
    let url = events::websocket_url(&ctx.base_url, &ctx.socket_path)?;
    let request = ws_request(url.as_str(), ctx.session_cookie.as_deref())?;
    let (stream, _) = connect_async(request).await?;
    info!(%url, "socket opened");
    Ok(stream)
}

async fn send_frame(stream: &mut SocketStream, frame: String) -> Result<(), CliError> {
    debug!(%frame, "socket ->");
    stream.send(Message::text(frame)).await?;
    Ok(())
}

/// Next packet that matters to callers. Heartbeats and the Engine.IO open
/// are answered here.
async fn next_inbound(stream: &mut SocketStream) -> Result<Inbound, CliError> {
    loop {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        let text = match message? {
            Message::Text(text) => text,
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => continue,
        };
        debug!(frame = text.as_str(), "socket <-");
        match events::classify(text.as_str()) {
            Ok(Inbound::Ping(payload)) => send_frame(stream, events::pong_frame(&payload)).await?,
            Ok(Inbound::Open(handshake)) => {
                debug!(sid = %handshake.sid, "engine open");
                send_frame(stream, events::connect_frame()).await?;
            }
            Ok(Inbound::Ignored) => {}
            Ok(inbound) => return Ok(inbound),
            Err(e) => warn!("dropping socket frame: {e}"),
        }
    }
}

/// Wait for the namespace connect, then join the room.
async fn connect_room(stream: &mut SocketStream, quote_id: &str) -> Result<(), CliError> {
    loop {
        match next_inbound(stream).await? {
            Inbound::Connected => break,
            Inbound::ConnectRefused(data) => {
                return Err(CliError::Refused(data.map(|d| d.to_string()).unwrap_or_default()));
            }
            Inbound::Disconnected | Inbound::Closed => return Err(CliError::WsClosed),
            _ => {}
        }
    }
    join(stream, quote_id).await
}

async fn join(stream: &mut SocketStream, quote_id: &str) -> Result<(), CliError> {
    let event = ClientEvent::Join {
        quote_id: quote_id.to_owned(),
    };
    send_frame(stream, event.encode()).await
}

fn render_message(msg: &ChatMessage, as_name: Option<&str>) -> String {
    let direction = if as_name.is_some_and(|name| msg.is_from(name)) {
        "sent"
    } else {
        "received"
    };
    let mut line = format!("[{direction}] {}: {}", msg.footer(), msg.text().unwrap_or_default());
    if let Some(filename) = msg.attachment() {
        line.push_str(&format!(" [attachment {}]", events::attachment_path(ATTACHMENT_BASE, filename)));
    }
    line
}

fn render_typing(event: &ServerEvent, as_name: Option<&str>) -> Option<String> {
    match event {
        ServerEvent::UserTyping { sender_name } if as_name != Some(sender_name.as_str()) => {
            Some(format!("{sender_name} is typing..."))
        }
        ServerEvent::UserStoppedTyping => Some("(stopped typing)".to_owned()),
        _ => None,
    }
}

async fn run_watch(ctx: &CliContext, quote_id: &str, as_name: Option<&str>) -> Result<(), CliError> {
    let mut stream = open_socket(ctx).await?;
    connect_room(&mut stream, quote_id).await?;
    eprintln!("watching quote {quote_id}; Ctrl-C to stop");

    loop {
        let inbound = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            inbound = next_inbound(&mut stream) => inbound,
        };
        match inbound {
            Ok(Inbound::Connected) => join(&mut stream, quote_id).await?,
            Ok(Inbound::Event(ServerEvent::Message(msg))) => println!("{}", render_message(&msg, as_name)),
            Ok(Inbound::Event(event)) => {
                if let Some(line) = render_typing(&event, as_name) {
                    println!("{line}");
                }
            }
            Ok(Inbound::Disconnected | Inbound::Closed) | Err(CliError::WsClosed) => {
                eprintln!("connection closed");
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(e),
        }
    }

    let _ = stream.close(None).await;
    Ok(())
}

fn is_echo(msg: &ChatMessage, text: Option<&str>, attachment: Option<&str>) -> bool {
    match (text, attachment) {
        (_, Some(filename)) => msg.attachment() == Some(filename),
        (Some(text), None) => msg.text() == Some(text),
        (None, None) => false,
    }
}

async fn run_send(ctx: &CliContext, args: SendArgs) -> Result<(), CliError> {
    let attachment = match &args.attach {
        Some(path) => Some(upload_file(ctx, path).await?),
        None => None,
    };
    let message = args
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToOwned::to_owned);
    if message.is_none() && attachment.is_none() {
        return Err(CliError::EmptyMessage);
    }

    let mut stream = open_socket(ctx).await?;
    connect_room(&mut stream, &args.quote_id).await?;

    let event = ClientEvent::SendMessage {
        quote_id: args.quote_id.clone(),
        message: message.clone(),
        attachment: attachment.clone(),
    };
    send_frame(&mut stream, event.encode()).await?;

    let wait = async {
        loop {
            if let Inbound::Event(ServerEvent::Message(msg)) = next_inbound(&mut stream).await? {
                if is_echo(&msg, message.as_deref(), attachment.as_deref()) {
                    return Ok::<_, CliError>(msg);
                }
            }
        }
    };
    let echo = tokio::time::timeout(Duration::from_secs(args.timeout_secs), wait)
        .await
        .map_err(|_| CliError::Timeout)??;
    println!("{}", render_message(&echo, args.as_name.as_deref()));

    let _ = stream.close(None).await;
    Ok(())
}
