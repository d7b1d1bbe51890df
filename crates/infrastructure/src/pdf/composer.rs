//! Consultation report composer

use application::ports::{DocumentError, DocumentPort};
use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use tracing::{debug, instrument};

use super::styles::{self, Alignment, ParagraphStyle};

/// US Letter page, in millimeters
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 20.0;

const PT_TO_MM: f32 = 0.352_778;

/// Average glyph width as a fraction of the font size (Helvetica)
const CHAR_WIDTH_FACTOR: f32 = 0.5;

/// One styled block of the report
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub text: String,
}

impl Paragraph {
    fn new(style: ParagraphStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Lays out a question/answer pair into a PDF document
#[derive(Debug, Clone)]
pub struct PdfComposer {
    assistant_name: String,
}

impl PdfComposer {
    /// Create a composer for the given assistant name
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    /// Build the report structure
    ///
    /// Pure: the same inputs always yield the same story, in the same
    /// order — title, timestamp, question, answer, footer.
    pub fn build_story(
        &self,
        question: &str,
        answer: &str,
        generated_at: DateTime<Utc>,
    ) -> Vec<Paragraph> {
        vec![
            Paragraph::new(
                styles::TITLE,
                format!("Informe de Consulta con {}", self.assistant_name),
            ),
            Paragraph::new(
                styles::BODY,
                format!("Fecha y Hora: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            ),
            Paragraph::new(styles::HEADING, "Pregunta del Usuario:"),
            Paragraph::new(styles::BODY, question),
            Paragraph::new(
                styles::HEADING,
                format!("Respuesta de {}:", self.assistant_name),
            ),
            Paragraph::new(styles::BODY, answer),
            Paragraph::new(
                styles::FOOTER,
                format!(
                    "Generado por {}, tu especialista en la obra de J.R.R. Tolkien.",
                    self.assistant_name
                ),
            ),
        ]
    }

    /// Render a story onto Letter pages
    fn render(&self, story: &[Paragraph]) -> Result<Vec<u8>, DocumentError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Informe de Consulta",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "contenido",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DocumentError::RenderFailed(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DocumentError::RenderFailed(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for paragraph in story {
            let style = &paragraph.style;
            y -= style.space_before * PT_TO_MM;

            let line_height = style.leading * PT_TO_MM;
            for line in wrap_text(&paragraph.text, max_chars_per_line(style.font_size)) {
                if y - line_height < MARGIN_MM {
                    let (page, page_layer) =
                        doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "contenido");
                    layer = doc.get_page(page).get_layer(page_layer);
                    y = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                y -= line_height;

                let x = match style.alignment {
                    Alignment::Left => MARGIN_MM,
                    Alignment::Center => centered_x(&line, style.font_size),
                };
                let font = if style.bold { &bold } else { &regular };

                layer.set_fill_color(Color::Rgb(Rgb::new(
                    style.color.0,
                    style.color.1,
                    style.color.2,
                    None,
                )));
                layer.use_text(line, style.font_size, Mm(x), Mm(y), font);
            }

            y -= style.space_after * PT_TO_MM;
        }

        doc.save_to_bytes()
            .map_err(|e| DocumentError::RenderFailed(e.to_string()))
    }
}

impl DocumentPort for PdfComposer {
    #[instrument(skip(self, question, answer))]
    fn render_consultation(
        &self,
        question: &str,
        answer: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, DocumentError> {
        let story = self.build_story(question, answer, generated_at);
        let bytes = self.render(&story)?;
        debug!(size = bytes.len(), "Consultation PDF rendered");
        Ok(bytes)
    }
}

/// Greedy word wrap; embedded newlines start fresh lines, words longer
/// than a line are hard-split
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in source_line.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if word_len > max_chars {
                for chunk in char_chunks(word, max_chars) {
                    if current_len > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_len = 0;
                    }
                    current = chunk;
                    current_len = current.chars().count();
                    if current_len == max_chars {
                        lines.push(std::mem::take(&mut current));
                        current_len = 0;
                    }
                }
                continue;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    lines
}

/// Split a word into chunks of at most `max_chars` characters
fn char_chunks(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars.max(1))
        .map(|c| c.iter().collect())
        .collect()
}

/// Characters that fit on one line at the given font size
fn max_chars_per_line(font_size: f32) -> usize {
    let usable_width_pt = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / PT_TO_MM;
    let chars = usable_width_pt / (font_size * CHAR_WIDTH_FACTOR);
    (chars as usize).max(1)
}

/// X position that centers a line, estimated from the average glyph width
fn centered_x(line: &str, font_size: f32) -> f32 {
    let width_mm = line.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR * PT_TO_MM;
    ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_MM)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap()
    }

    #[test]
    fn story_has_sections_in_fixed_order() {
        let composer = PdfComposer::new("Elendur");
        let story = composer.build_story("¿Quién es Gandalf?", "Un Maia.", fixed_time());

        assert_eq!(story.len(), 7);
        assert_eq!(story[0].text, "Informe de Consulta con Elendur");
        assert_eq!(story[1].text, "Fecha y Hora: 2024-05-17 12:30:00");
        assert_eq!(story[2].text, "Pregunta del Usuario:");
        assert_eq!(story[3].text, "¿Quién es Gandalf?");
        assert_eq!(story[4].text, "Respuesta de Elendur:");
        assert_eq!(story[5].text, "Un Maia.");
        assert!(story[6].text.starts_with("Generado por Elendur"));
    }

    #[test]
    fn identical_inputs_yield_identical_stories() {
        let composer = PdfComposer::new("Elendur");
        let first = composer.build_story("Q", "A", fixed_time());
        let second = composer.build_story("Q", "A", fixed_time());
        assert_eq!(first, second);
    }

    #[test]
    fn question_and_answer_are_verbatim() {
        let composer = PdfComposer::new("Elendur");
        let story = composer.build_story("  pregunta cruda  ", "respuesta\ncon saltos", fixed_time());
        assert_eq!(story[3].text, "  pregunta cruda  ");
        assert_eq!(story[5].text, "respuesta\ncon saltos");
    }

    #[test]
    fn rendered_bytes_are_a_pdf() {
        let composer = PdfComposer::new("Elendur");
        let bytes = composer
            .render_consultation("¿Quién es Gandalf?", "Un Maia.", fixed_time())
            .unwrap();

        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..4], b"%PDF");
    }

    #[test]
    fn long_answers_render_across_pages() {
        let composer = PdfComposer::new("Elendur");
        let answer = "La historia de los Silmarils es extensa. ".repeat(400);
        let bytes = composer
            .render_consultation("Cuéntame todo.", &answer, fixed_time())
            .unwrap();

        assert!(!bytes.is_empty());
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("uno dos tres cuatro", 9);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
    }

    #[test]
    fn wrap_preserves_paragraph_breaks() {
        let lines = wrap_text("primera\nsegunda", 20);
        assert_eq!(lines, vec!["primera", "segunda"]);
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_text_yields_one_empty_line() {
        let lines = wrap_text("", 10);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn centered_x_never_leaves_the_margin() {
        let very_long = "x".repeat(500);
        assert_eq!(centered_x(&very_long, 20.0), MARGIN_MM);
    }
}
