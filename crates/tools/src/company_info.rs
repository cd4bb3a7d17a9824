//! Company information tool: philosophy, history and contact details.
//!
//! By default the dispatcher serves this tool through retrieval. When it is
//! not listed in `agent.retrieval_tools` it runs as a plain function and
//! answers from the `[company]` profile in config.

use async_trait::async_trait;
use routeclaw_config::CompanyConfig;
use routeclaw_core::error::ToolError;
use routeclaw_core::routing::ToolArguments;
use routeclaw_core::tool::Tool;
use tracing::debug;

pub const COMPANY_INFO_TOOL: &str = "info_empresa_contacto_filosofia";

pub struct CompanyInfoTool {
    profile: CompanyConfig,
}

impl CompanyInfoTool {
    pub fn new(profile: CompanyConfig) -> Self {
        Self { profile }
    }

    fn section(&self, topic: &str) -> Option<String> {
        let topic = topic.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| topic.contains(w));

        if has(&["filosof", "valor", "mision", "misión", "philosoph"]) {
            Some(format!("Filosofía de {}: {}", self.profile.name, self.profile.philosophy))
        } else if has(&["histor", "fundac", "origen", "history"]) {
            Some(format!("Historia de {}: {}", self.profile.name, self.profile.history))
        } else if has(&["contact", "telef", "teléf", "correo", "email", "horario"]) {
            Some(format!("Contacto de {}: {}", self.profile.name, self.profile.contact))
        } else {
            None
        }
    }

    fn full_profile(&self) -> String {
        format!(
            "{}\nFilosofía: {}\nHistoria: {}\nContacto: {}",
            self.profile.name, self.profile.philosophy, self.profile.history, self.profile.contact
        )
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    fn name(&self) -> &str {
        COMPANY_INFO_TOOL
    }

    fn description(&self) -> &str {
        "Proporciona información sobre la empresa: su filosofía, su historia y sus datos de contacto. Parámetro: 'tema' (el tema consultado)."
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let topic = arguments.get("tema").map(String::as_str).unwrap_or("");
        debug!(topic = %topic, "Company info lookup");
        Ok(self.section(topic).unwrap_or_else(|| self.full_profile()))
    }
}
