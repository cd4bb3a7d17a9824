//! Prompt text and response markers.

/// Default persona, sent as the system message on every call.
pub const SYSTEM_AGENT_PROMPT: &str = "Eres un agente conversacional experto. \
Tu objetivo es asistir al usuario decidiendo si la consulta requiere una 'Tool' \
específica, recuperación de contexto 'RAG', o una respuesta directa del 'LLM'. \
Si el usuario pregunta sobre la filosofía, historia, o información de contacto de la empresa, DEBES usar la tool 'info_empresa_contacto_filosofia'. \
Si el usuario pregunta sobre documentación, políticas (e.g., cancelación, check-in), o manuales, usa RAG. \
En otros casos, responde directamente.";

/// Marker for answers grounded in retrieved context.
pub const RAG_MARKER: &str = "💬 Agente (RAG, impulsado por Tool): ";

/// Marker for answers produced directly by the model.
pub const DIRECT_MARKER: &str = "💡 Agente (LLM): ";

/// Output of an unregistered tool.
pub const TOOL_NOT_FOUND: &str = "Tool no encontrada.";

/// Marker for answers produced by executing a tool.
pub fn tool_marker(tool_name: &str) -> String {
    format!("✅ Respuesta de la Tool ({tool_name}): ")
}

/// The routing instruction: decision request, tool list, and strict output format.
pub fn routing_instruction(user_input: &str, tool_descriptions: &str) -> String {
    format!(
        "Dado el historial de conversación y la última pregunta del usuario: '{user_input}', \
decide si alguna de las siguientes tools es relevante. \
Si lo es, genera la llamada a la función en formato JSON. Si no es relevante, responde 'NO_TOOL'.\
\n\nHerramientas disponibles:\n{tool_descriptions}\
\n\nResponde ÚNICAMENTE con un JSON válido en el formato: \
{{\"tool_name\": \"nombre_tool\", \"tool_input\": {{\"param1\": \"valor1\", \"param2\": \"valor2\"}}}}. \
Si no se requiere ninguna herramienta, responde ÚNICAMENTE: NO_TOOL"
    )
}

/// System prompt for the retrieval answer: persona plus retrieved context.
pub fn rag_prompt(persona: &str, tool_name: &str, user_input: &str, context: &str) -> String {
    format!(
        "{persona}\n\n\
Tu herramienta de {tool_name} te ha dirigido a usar RAG. \
Usa el siguiente contexto para responder a la pregunta original del usuario: '{user_input}'.\n\
Contexto: {context}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_instruction_contains_all_parts() {
        let text = routing_instruction("¿Cuál es la política?", "- a: first\n- b: second");
        assert!(text.contains("'¿Cuál es la política?'"));
        assert!(text.contains("Herramientas disponibles:\n- a: first\n- b: second"));
        assert!(text.contains(r#"{"tool_name": "nombre_tool", "tool_input": {"param1": "valor1", "param2": "valor2"}}"#));
        assert!(text.ends_with("responde ÚNICAMENTE: NO_TOOL"));
    }

    #[test]
    fn rag_prompt_with_empty_context() {
        let text = rag_prompt("Persona.", "info", "¿horario?", "");
        assert!(text.starts_with("Persona.\n\n"));
        assert!(text.ends_with("Contexto: "));
    }

    #[test]
    fn tool_marker_names_tool() {
        assert_eq!(tool_marker("echo"), "✅ Respuesta de la Tool (echo): ");
    }
}
