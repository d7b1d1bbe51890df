//! Async SMTP client
//!
//! Plain tokio + tokio-native-tls, no connection pooling: a delivery
//! email is rare enough that a fresh session per send is the simpler
//! and safer shape.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpStream,
};
use tokio_native_tls::TlsConnector;
use tracing::{debug, error, instrument, trace, warn};

/// SMTP integration errors
#[derive(Debug, Error)]
pub enum SmtpError {
    /// TCP connect or TLS handshake failure
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Server rejected the configured credentials
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Invalid sender or recipient address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Unexpected protocol exchange
    #[error("SMTP error: {0}")]
    Protocol(String),
}

/// SMTP submission configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Submission server host
    pub host: String,
    /// Submission port (587 STARTTLS by default, 465 implicit TLS)
    pub port: u16,
    /// Sender address, also used as the AUTH identity
    pub sender: String,
    /// Sender credential
    #[serde(skip_serializing)]
    pub password: String,
    /// Display name placed in the From header
    pub sender_name: String,
    /// Accept self-signed certificates (local test servers only)
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl SmtpConfig {
    /// Create a config for the given server and credentials
    pub fn new(
        host: impl Into<String>,
        port: u16,
        sender: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            sender: sender.into(),
            password: password.into(),
            sender_name: String::new(),
            accept_invalid_certs: false,
        }
    }

    /// Set the display name used in the From header
    #[must_use]
    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = sender_name.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), SmtpError> {
        if self.host.is_empty() {
            return Err(SmtpError::ConnectionFailed(
                "SMTP host is required".to_string(),
            ));
        }
        if self.sender.is_empty() || !self.sender.contains('@') {
            return Err(SmtpError::InvalidAddress(format!(
                "Invalid sender: {}",
                self.sender
            )));
        }
        if self.password.is_empty() {
            return Err(SmtpError::AuthenticationFailed);
        }
        Ok(())
    }
}

/// A message to be submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl OutboundMessage {
    /// Creates a new message
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Validates the message
    pub fn validate(&self) -> Result<(), SmtpError> {
        if self.to.is_empty() || !self.to.contains('@') {
            return Err(SmtpError::InvalidAddress(format!(
                "Invalid recipient: {}",
                self.to
            )));
        }
        Ok(())
    }
}

/// SMTP client scoped to one configuration
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a new mailer with the given configuration
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Sends a message, returning its Message-ID
    #[instrument(skip(self, message), fields(to = %message.to))]
    pub async fn send(&self, message: &OutboundMessage) -> Result<String, SmtpError> {
        self.config.validate()?;
        message.validate()?;

        debug!(subject = %message.subject, "Sending email");

        let message_id = format!(
            "<{}.{}@{}>",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4(),
            sender_domain(&self.config.sender)
        );

        let content = self.build_message(message, &message_id);
        self.submit(&message.to, &content).await?;

        debug!(message_id = %message_id, "Email sent");
        Ok(message_id)
    }

    /// Builds the RFC 5322 message text
    fn build_message(&self, message: &OutboundMessage, message_id: &str) -> String {
        let date = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S +0000");
        let from = if self.config.sender_name.is_empty() {
            self.config.sender.clone()
        } else {
            format!(
                "{} <{}>",
                encode_header_word(&self.config.sender_name),
                self.config.sender
            )
        };

        format!(
            "From: {from}\r\n\
             To: {}\r\n\
             Subject: {}\r\n\
             Date: {date}\r\n\
             Message-ID: {message_id}\r\n\
             MIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             Content-Transfer-Encoding: 8bit\r\n\
             \r\n\
             {}",
            message.to,
            encode_header_word(&message.subject),
            message.body
        )
    }

    /// Opens a connection, negotiates TLS and runs the submission
    async fn submit(&self, to: &str, content: &str) -> Result<(), SmtpError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let stream = TcpStream::connect(&addr).await.map_err(|e| {
            error!(error = %e, "Failed to connect to SMTP server");
            SmtpError::ConnectionFailed(format!("SMTP connection failed: {e}"))
        })?;

        // Port 465 speaks TLS from the first byte; everything else
        // starts in clear text and upgrades via STARTTLS.
        if self.config.port == 465 {
            let tls = self.build_tls_connector()?;
            let tls_stream = tls
                .connect(&self.config.host, stream)
                .await
                .map_err(|e| SmtpError::ConnectionFailed(format!("TLS handshake failed: {e}")))?;
            self.session(tls_stream, to, content).await
        } else {
            self.starttls_session(stream, to, content).await
        }
    }

    /// Clear-text preamble up to the STARTTLS upgrade
    async fn starttls_session(
        &self,
        stream: TcpStream,
        to: &str,
        content: &str,
    ) -> Result<(), SmtpError> {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        read_reply(&mut reader).await?;

        send_command(&mut writer, &format!("EHLO {}", local_hostname())).await?;
        read_reply(&mut reader).await?;

        send_command(&mut writer, "STARTTLS").await?;
        expect_reply(&mut reader, "220").await?;

        let stream = reader.into_inner().unsplit(writer);
        let tls = self.build_tls_connector()?;
        let tls_stream = tls
            .connect(&self.config.host, stream)
            .await
            .map_err(|e| SmtpError::ConnectionFailed(format!("STARTTLS upgrade failed: {e}")))?;

        self.session_after_tls(tls_stream, to, content).await
    }

    /// Session over an implicit-TLS stream (greeting still pending)
    async fn session<S>(&self, stream: S, to: &str, content: &str) -> Result<(), SmtpError>
    where
        S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        read_reply(&mut reader).await?;
        self.authenticated_exchange(&mut reader, &mut writer, to, content)
            .await
    }

    /// Session over a freshly upgraded STARTTLS stream (no greeting)
    async fn session_after_tls<S>(&self, stream: S, to: &str, content: &str) -> Result<(), SmtpError>
    where
        S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        self.authenticated_exchange(&mut reader, &mut writer, to, content)
            .await
    }

    /// EHLO, AUTH and the mail transaction proper
    async fn authenticated_exchange<R, W>(
        &self,
        reader: &mut BufReader<R>,
        writer: &mut W,
        to: &str,
        content: &str,
    ) -> Result<(), SmtpError>
    where
        R: tokio::io::AsyncRead + Unpin,
        W: tokio::io::AsyncWrite + Unpin,
    {
        send_command(writer, &format!("EHLO {}", local_hostname())).await?;
        read_reply(reader).await?;

        let auth = base64::engine::general_purpose::STANDARD
            .encode(format!("\0{}\0{}", self.config.sender, self.config.password));
        send_command(writer, &format!("AUTH PLAIN {auth}")).await?;
        let reply = read_reply(reader).await?;
        if !reply.starts_with("235") {
            return Err(SmtpError::AuthenticationFailed);
        }

        send_command(writer, &format!("MAIL FROM:<{}>", self.config.sender)).await?;
        expect_reply(reader, "250").await?;

        send_command(writer, &format!("RCPT TO:<{to}>")).await?;
        expect_reply(reader, "250").await?;

        send_command(writer, "DATA").await?;
        expect_reply(reader, "354").await?;

        // Dot-stuff lines starting with '.' per RFC 5321 §4.5.2
        let escaped = content.replace("\r\n.", "\r\n..");
        writer
            .write_all(escaped.as_bytes())
            .await
            .map_err(|e| SmtpError::Protocol(format!("Failed to send content: {e}")))?;
        writer
            .write_all(b"\r\n.\r\n")
            .await
            .map_err(|e| SmtpError::Protocol(format!("Failed to end DATA: {e}")))?;
        writer.flush().await.ok();

        expect_reply(reader, "250").await?;

        send_command(writer, "QUIT").await?;
        // Server may close without answering QUIT

        Ok(())
    }

    /// Builds the TLS connector
    fn build_tls_connector(&self) -> Result<TlsConnector, SmtpError> {
        let mut builder = native_tls::TlsConnector::builder();
        builder.min_protocol_version(Some(native_tls::Protocol::Tlsv12));

        if self.config.accept_invalid_certs {
            warn!("TLS certificate verification disabled for SMTP - local test servers only");
            builder.danger_accept_invalid_certs(true);
        }

        let connector = builder
            .build()
            .map_err(|e| SmtpError::ConnectionFailed(format!("TLS builder failed: {e}")))?;

        Ok(TlsConnector::from(connector))
    }

    /// Checks if the submission server accepts TCP connections
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> bool {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        match TcpStream::connect(&addr).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "SMTP server is not reachable");
                false
            },
        }
    }
}

/// Sends one SMTP command line
async fn send_command<W>(writer: &mut W, command: &str) -> Result<(), SmtpError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    trace!(command = %command.split(' ').next().unwrap_or(command), "SMTP command");
    writer
        .write_all(format!("{command}\r\n").as_bytes())
        .await
        .map_err(|e| SmtpError::Protocol(format!("Failed to send command: {e}")))?;
    writer.flush().await.ok();
    Ok(())
}

/// Reads one (possibly multi-line) SMTP reply
async fn read_reply<R>(reader: &mut BufReader<R>) -> Result<String, SmtpError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut reply = String::new();
    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| SmtpError::Protocol(format!("Failed to read reply: {e}")))?;
        if read == 0 {
            return Err(SmtpError::Protocol("Connection closed".to_string()));
        }

        trace!(line = %line.trim(), "SMTP reply");
        reply.push_str(&line);

        // Last line of a reply has a space (not a hyphen) after the code
        if line.len() >= 4 && line.chars().nth(3) != Some('-') {
            break;
        }
    }
    Ok(reply)
}

/// Reads a reply and demands a specific status code
async fn expect_reply<R>(reader: &mut BufReader<R>, expected_code: &str) -> Result<(), SmtpError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let reply = read_reply(reader).await?;
    if !reply.starts_with(expected_code) {
        return Err(SmtpError::Protocol(format!(
            "Expected {expected_code}, got: {reply}"
        )));
    }
    Ok(())
}

/// RFC 2047 encoded-word for header values, pass-through for plain ASCII
fn encode_header_word(text: &str) -> String {
    if text.is_ascii() {
        text.to_string()
    } else {
        format!(
            "=?utf-8?B?{}?=",
            base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
        )
    }
}

/// Domain of the sender address, for Message-ID generation
fn sender_domain(sender: &str) -> &str {
    sender.split('@').nth(1).unwrap_or("localhost")
}

/// Hostname announced in EHLO
fn local_hostname() -> String {
    hostname::get().map_or_else(
        |_| "localhost".to_string(),
        |h| h.to_string_lossy().to_string(),
    )
}
