//! The nine PHQ-9 items, Spanish edition.
//!
//! The wording is fixed; the model reads these from the instructions and asks
//! them one at a time.

/// Number of items in the questionnaire.
pub const QUESTION_COUNT: usize = 9;

/// Recall window every item refers to.
pub const RECALL_WINDOW: &str = "las últimas dos semanas";

/// Item texts in administration order.
pub const PHQ9_QUESTIONS: [&str; QUESTION_COUNT] = [
    "¿Con qué frecuencia te has encontrado con poco interés o poco placer en hacer las cosas?",
    "¿Con qué frecuencia te has sentido decaído/a, deprimido/a o sin esperanzas?",
    "¿Con qué frecuencia has tenido problemas de sueño (dificultad para quedarte dormido/a o dormir demasiado)?",
    "¿Con qué frecuencia te has sentido cansado/a o con poca energía?",
    "¿Con qué frecuencia has estado sin apetito o has comido en exceso?",
    "¿Con qué frecuencia te has sentido mal contigo mismo/a, que eres un fracaso o que has quedado mal contigo mismo/a o tu familia?",
    "¿Con qué frecuencia has tenido dificultades para concentrarte en actividades como leer o ver la televisión?",
    "¿Con qué frecuencia te has movido muy lento o has estado inquieto/a y agitado/a, moviéndote más de lo normal?",
    "¿Con qué frecuencia has pensado que estarías mejor muerto o en hacerte daño de alguna manera?",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_nine_distinct_questions() {
        let mut unique: Vec<&str> = PHQ9_QUESTIONS.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), QUESTION_COUNT);
    }

    #[test]
    fn every_question_asks_about_frequency() {
        for q in PHQ9_QUESTIONS {
            assert!(q.starts_with("¿Con qué frecuencia"), "{q}");
            assert!(q.ends_with('?'), "{q}");
        }
    }
}
