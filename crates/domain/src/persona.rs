//! Assistant persona
//!
//! The persona is the standing system instruction that shapes every
//! model call. The assistant's display name is derived from the
//! instruction text itself: the first line carrying the naming marker
//! (`"llamado "`) names the assistant, up to the first terminating
//! punctuation. Derivation is total — any malformed text falls back to
//! a fixed label, so the rest of the system can rely on the name
//! always existing.

use serde::{Deserialize, Serialize};

/// Marker phrase that introduces the assistant's name in the persona text
const NAME_MARKER: &str = "llamado ";

/// Label used when the persona text does not name the assistant
const DEFAULT_DISPLAY_NAME: &str = "Elendur (Asistente Académico)";

/// System instruction for the Tolkien scholar persona
const ELENDUR_INSTRUCTION: &str = "\
Eres un asistente de IA llamado Elendur.
Tu rol es el de un académico y especialista riguroso en la obra completa de J.R.R. Tolkien \
y toda la mitología de Arda (incluyendo libros, manuscritos, lenguajes y estudios relevantes).
Tu objetivo es proporcionar información precisa y concreta sobre estos temas, basada \
estrictamente en el canon primario y secundario de Tolkien.
El tono de tus respuestas debe ser formal, objetivo y académico. Evita cualquier expresión \
de familiaridad, entusiasmo o uso de emojis.
Responde a las preguntas directamente y con concisión, enfocándote en los hechos y detalles \
relevantes.
Si la información solicitada es especulativa, no confirmada en las obras de Tolkien, o si no \
tienes datos disponibles, indícalo de manera clara y formal, mencionando la limitación o la \
fuente (o falta de ella).
Siempre busca ofrecer la información más relevante y verificable dentro del ámbito académico \
de los estudios de Tolkien.
Mantén siempre tu identidad como Elendur, el especialista académico en Tolkien.";

/// The assistant's standing instruction text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    instruction: String,
}

impl Persona {
    /// Create a persona from arbitrary instruction text
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    /// The built-in Tolkien scholar persona
    pub fn elendur() -> Self {
        Self::new(ELENDUR_INSTRUCTION)
    }

    /// Full instruction text, as handed to the model gateway
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Display name derived from the instruction text
    ///
    /// Scans for the first line containing the naming marker and takes
    /// the words after it, up to the first `.` or `,`. Falls back to a
    /// fixed label when no line matches or the extracted name is blank.
    pub fn display_name(&self) -> String {
        self.instruction
            .lines()
            .find_map(Self::name_from_line)
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }

    fn name_from_line(line: &str) -> Option<String> {
        let (_, rest) = line.split_once(NAME_MARKER)?;
        let name = rest
            .split(['.', ','])
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::elendur()
    }
}
