//! The document corpus indexed at startup.

use routeclaw_config::KnowledgeConfig;
use routeclaw_core::error::KnowledgeError;
use tracing::debug;

/// Built-in passages for the glamping booking assistant.
pub const SAMPLE_DOCUMENTS: &[&str] = &[
    "Política de Cancelación: Se aceptan cancelaciones hasta 48 horas antes de la llegada con reembolso total.",
    "Manual de usuario del agente: El agente solo puede reservar glamping, no hoteles.",
    "Horario de Check-in: El check-in es a las 15:00 horas. El check-out es a las 11:00 horas.",
];

/// Collect the corpus: sample passages (if enabled), inline documents,
/// then one document per configured file, in that order.
pub async fn load_corpus(config: &KnowledgeConfig) -> Result<Vec<String>, KnowledgeError> {
    let mut documents: Vec<String> = Vec::new();

    if config.include_samples {
        documents.extend(SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()));
    }
    documents.extend(config.documents.iter().cloned());

    for path in &config.paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| KnowledgeError::DocumentRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), bytes = text.len(), "Loaded corpus document");
        documents.push(text);
    }

    Ok(documents)
}
