//! Interview protocol definition.
//!
//! The protocol is the system instruction that drives the whole interview:
//! persona, greeting, one question per turn, the nine items, the severity
//! taxonomy, clarification and the closing summary. It is rendered once and
//! never changes for the lifetime of a session.
//!
//! The protocol is configuration, not logic. Question order, answer
//! classification and the end of the interview are all left to the model.

use once_cell::sync::Lazy;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::questions::{PHQ9_QUESTIONS, RECALL_WINDOW};
use super::severity::SeverityLevel;

/// Errors that can occur while loading protocol text.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Interview protocol text is empty")]
    Empty,

    #[error("Failed to read interview protocol from {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable instruction text for one interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewProtocol {
    instructions: String,
}

impl InterviewProtocol {
    /// The built-in PerlaGPT PHQ-9 protocol, in Spanish.
    pub fn phq9() -> Self {
        Self {
            instructions: String::clone(&PHQ9_INSTRUCTIONS),
        }
    }

    /// Wraps custom instruction text.
    ///
    /// # Errors
    ///
    /// - `Empty` if the text is empty or whitespace only
    pub fn from_text(text: impl Into<String>) -> Result<Self, ProtocolError> {
        let instructions = text.into();
        if instructions.trim().is_empty() {
            return Err(ProtocolError::Empty);
        }
        Ok(Self { instructions })
    }

    /// Reads instruction text from a UTF-8 file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProtocolError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(text)
    }

    /// Returns the instruction text sent as the system turn.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }
}

impl Default for InterviewProtocol {
    fn default() -> Self {
        Self::phq9()
    }
}

// ============================================================================
// PerlaGPT PHQ-9 template
// ============================================================================

const PERSONA: &str = "Eres PerlaGPT, una asistente especializada en salud mental cuya misión es \
determinar si una persona tiene un nivel alto de depresión o no.";

const GREETING: &str = "Lo primero que tienes que hacer es saludar al usuario, presentarte y explicar \
de forma concisa que le vas a hacer una serie de preguntas para determinar su nivel de depresión. \
Pregunta su nombre para ver cómo dirigirte al usuario.";

const PACING: &str = "Una vez que ya te hayas presentado y le hayas dado la oportunidad de decirte \
su nombre puedes comenzar a hacer las preguntas correspondientes al cuestionario PHQ-9 \
(Patient Health Questionaire) en su versión en Español. Tienes que hacer las preguntas de una en una. \
No pases a la siguiente pregunta hasta que tengas la respuesta de la pregunta actual. \
No empieces a preguntar en el primer mensaje. No muestres todas las preguntas al principio.";

const CLARIFICATION: &str = "Si el usuario no entiende bien alguna pregunta, le puedes aclarar su \
significado explicándoselo con otras palabras, intenta utilizar el mismo tipo de lenguaje que use el \
propio usuario. Asegúrate de recoger las respuestas a las nueve preguntas. Cada vez que el usuario te \
responda a una pregunta le puedes mostrar tu aprecio por el esfuerzo realizado antes de pasar a la \
siguiente pregunta. Habla siempre con un estilo cercano, comprensivo y amigable, que haga que la \
persona se sienta escuchada, comprendida y respetada.";

const CLASSIFICATION: &str = "Para cada respuesta obtenida debes determinar la frecuencia con la que \
aparece el síntoma y asignarle uno de los siguientes cuatro niveles (los niveles tienen un nombre, \
una descripción y una puntuación numérica asociados):";

const RETRY_AND_SUMMARY: &str = "Si no eres capaz de determinar el nivel correspondiente para alguna \
de las preguntas, debes repetir la pregunta hasta que consigas averiguar la frecuencia del síntoma \
correspondiente. Cuando ya tengas la respuesta a todas las preguntas haz un resumen de la información \
obtenida, indicando de manera muy concisa la puntuación correspondiente a cada una de las nueve preguntas.";

static PHQ9_INSTRUCTIONS: Lazy<String> = Lazy::new(render_phq9);

fn render_phq9() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{PERSONA}");
    let _ = writeln!(out, "{GREETING}");
    let _ = writeln!(out, "{PACING}");
    let _ = writeln!(
        out,
        "Todas las preguntas se refieren al estado emocional de la persona en {RECALL_WINDOW}. \
Es importante que le recuerdes que conteste sólo en relación a {RECALL_WINDOW}."
    );
    let _ = writeln!(out, "Las preguntas del PHQ-9 en español son las siguientes:");
    out.push('\n');
    for question in PHQ9_QUESTIONS {
        let _ = writeln!(out, "{question}");
    }
    out.push('\n');
    let _ = writeln!(out, "{CLARIFICATION}");
    let _ = writeln!(out, "{CLASSIFICATION}");
    out.push('\n');
    for level in SeverityLevel::ALL {
        let _ = writeln!(out, "- {}: {}", level.name(), level.description());
    }
    out.push('\n');
    let _ = writeln!(out, "{RETRY_AND_SUMMARY}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    mod phq9 {
        use super::*;

        #[test]
        fn introduces_persona_first() {
            let protocol = InterviewProtocol::phq9();
            assert!(protocol.instructions().starts_with("Eres PerlaGPT"));
        }

        #[test]
        fn contains_every_question_in_order() {
            let text = InterviewProtocol::phq9().instructions().to_string();
            let mut cursor = 0;
            for q in PHQ9_QUESTIONS {
                let at = text[cursor..].find(q).expect("question missing or out of order");
                cursor += at + q.len();
            }
        }

        #[test]
        fn lists_all_severity_levels() {
            let text = InterviewProtocol::phq9().instructions().to_string();
            for level in SeverityLevel::ALL {
                assert!(text.contains(&format!("- {}: {}", level.name(), level.description())));
            }
        }

        #[test]
        fn states_pacing_retry_and_summary_rules() {
            let text = InterviewProtocol::phq9().instructions().to_string();
            assert!(text.contains("de una en una"));
            assert!(text.contains("No muestres todas las preguntas al principio"));
            assert!(text.contains("debes repetir la pregunta"));
            assert!(text.contains("haz un resumen"));
            assert!(text.contains(RECALL_WINDOW));
        }

        #[test]
        fn is_identical_across_calls() {
            assert_eq!(InterviewProtocol::phq9(), InterviewProtocol::default());
        }
    }

    mod custom_text {
        use super::*;

        #[test]
        fn accepts_non_empty_text() {
            let protocol = InterviewProtocol::from_text("Be brief.").unwrap();
            assert_eq!(protocol.instructions(), "Be brief.");
        }

        #[test]
        fn rejects_blank_text() {
            assert!(matches!(
                InterviewProtocol::from_text(" \n "),
                Err(ProtocolError::Empty)
            ));
        }

        #[test]
        fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "Eres una entrevistadora.").unwrap();

            let protocol = InterviewProtocol::from_file(file.path()).unwrap();
            assert_eq!(protocol.instructions(), "Eres una entrevistadora.");
        }

        #[test]
        fn empty_file_is_rejected() {
            let file = tempfile::NamedTempFile::new().unwrap();
            assert!(matches!(
                InterviewProtocol::from_file(file.path()),
                Err(ProtocolError::Empty)
            ));
        }

        #[test]
        fn missing_file_reports_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("absent.txt");
            let err = InterviewProtocol::from_file(&path).unwrap_err();
            assert!(err.to_string().contains("absent.txt"));
        }
    }
}
