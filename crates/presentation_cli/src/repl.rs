//! Interactive conversation loop
//!
//! Generic over its reader and writer so the whole loop can be driven
//! from in-memory buffers in tests. The pending-delivery state is an
//! explicit value threaded through the iterations, not a loop-captured
//! mutable.

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use application::{ChatService, EmailService};
use domain::{ChatTurn, EmailAddress};

/// Keywords that end the session, matched case-insensitively
const EXIT_KEYWORDS: [&str; 4] = ["salir", "adios", "quit", "exit"];

/// Answers counted as a yes to the delivery follow-up
const AFFIRMATIONS: [&str; 4] = ["sí", "si", "ok", "yes"];

/// Services and identity the loop runs against
pub struct ReplContext {
    pub chat_service: Arc<ChatService>,
    pub email_service: Arc<EmailService>,
    pub assistant_name: String,
}

/// Reply pending a delivery decision
///
/// Cleared after every send attempt so a stale reply can never be
/// mailed twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TurnState {
    last_reply: Option<String>,
}

impl TurnState {
    fn recorded(reply: impl Into<String>) -> Self {
        Self {
            last_reply: Some(reply.into()),
        }
    }

    const fn cleared() -> Self {
        Self { last_reply: None }
    }

    fn pending_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }
}

/// Whether the input ends the session
fn is_exit_command(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&normalized.as_str())
}

/// Whether the input affirms the delivery follow-up
fn is_affirmative(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    AFFIRMATIONS.contains(&normalized.as_str())
}

/// Run the conversation loop until an exit keyword or end of input
pub async fn run<R, W>(ctx: &ReplContext, mut input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let name = &ctx.assistant_name;

    writeln!(
        output,
        "Saludos. Soy {name}, su asistente académico especializado en la obra de J.R.R. Tolkien. \
         Estoy a su disposición para consultas rigurosas."
    )?;
    if ctx.email_service.is_available() {
        writeln!(
            output,
            "Si desea recibir por correo la información que le proporcione, indíquelo tras \
             recibir mi respuesta."
        )?;
    } else {
        writeln!(
            output,
            "Nota: La funcionalidad de envío de correo no se encuentra disponible debido a la \
             falta de configuración."
        )?;
    }
    writeln!(output, "Para finalizar la sesión, escriba 'salir' o 'adios'.")?;
    writeln!(output, "{}", "-".repeat(30))?;

    let mut history: Vec<ChatTurn> = Vec::new();
    let mut state = TurnState::cleared();

    loop {
        let Some(user_input) = prompt(&mut input, &mut output, "Tú: ")? else {
            break;
        };

        if is_exit_command(&user_input) {
            writeln!(output, "{name}: ¡Adiós! Que los caminos te sean leves.")?;
            break;
        }

        if user_input.trim().is_empty() {
            continue;
        }

        state = match ctx.chat_service.chat_with_history(&history, &user_input).await {
            Ok(turn) => {
                writeln!(output, "{name}: {}", turn.assistant_reply)?;
                let reply = turn.assistant_reply.clone();
                history.push(turn);
                TurnState::recorded(reply)
            },
            Err(_) => {
                writeln!(
                    output,
                    "{name}: (No pude generar una respuesta en este momento. ¿Podrías intentarlo \
                     de otra forma?)"
                )?;
                writeln!(output, "Por favor, intenta de nuevo.")?;
                TurnState::cleared()
            },
        };

        if ctx.email_service.is_available() && state.pending_reply().is_some() {
            state = offer_email(ctx, &mut input, &mut output, state).await?;
        }
    }

    writeln!(output, "{}", "-".repeat(30))?;
    writeln!(output, "Conversación terminada.")?;

    Ok(())
}

/// Delivery follow-up: ask, validate, send, report
async fn offer_email<R, W>(
    ctx: &ReplContext,
    input: &mut R,
    output: &mut W,
    state: TurnState,
) -> io::Result<TurnState>
where
    R: BufRead,
    W: Write,
{
    let name = &ctx.assistant_name;

    let question =
        format!("{name}: ¿Te gustaría que te envíe esta información por correo? (sí/no) ");
    let Some(answer) = prompt(input, output, &question)? else {
        return Ok(state);
    };

    if !is_affirmative(&answer) {
        return Ok(state);
    }

    writeln!(
        output,
        "{name}: ¡Claro! ¿A qué dirección de correo electrónico debo enviarte la información?"
    )?;
    let Some(recipient_input) = prompt(input, output, "Dirección de correo: ")? else {
        return Ok(state);
    };

    let Ok(recipient) = EmailAddress::new(&recipient_input) else {
        writeln!(
            output,
            "{name}: Hmm, parece que '{}' no es una dirección de correo válida. No podré enviarlo.",
            recipient_input.trim()
        )?;
        return Ok(state);
    };

    let Some(reply) = state.pending_reply() else {
        return Ok(state);
    };

    let subject = format!("Información de Tolkien de {name}");
    writeln!(output, "Preparando para enviar correo...")?;

    match ctx.email_service.send(&recipient, &subject, reply).await {
        Ok(()) => {
            writeln!(output, "{name}: ¡Listo! He enviado la información a {recipient}.")?;
        },
        Err(_) => {
            writeln!(
                output,
                "{name}: Lo siento, hubo un problema al enviar el correo. Verifica las \
                 credenciales o intenta de nuevo."
            )?;
        },
    }

    // Attempted — never offer the same reply again
    Ok(TurnState::cleared())
}

/// Print a prompt and read one line; `None` at end of input
fn prompt<R, W>(input: &mut R, output: &mut W, text: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
