//! System instructions and schemas for the two assistant operations.

use ventanas_perfectas_core::{GlassType, Material, Profile, WindowType};

use crate::content;

/// System instruction for configuration extraction.
pub const EXTRACTION_SYSTEM_INSTRUCTION: &str = "Eres un asistente experto en configuración de \
     ventanas. Tu única tarea es extraer los parámetros de la descripción del usuario y \
     devolverlos en formato JSON según el esquema proporcionado. No añadas explicaciones ni \
     texto adicional.";

/// User prompt wrapping a free-text window description.
#[must_use]
pub fn extraction_prompt(description: &str) -> String {
    format!(
        "Analiza la siguiente descripción de una ventana y extrae sus características. \
         Descripción: \"{description}\""
    )
}

/// Response schema constraining the extraction output to the configurator's
/// vocabulary. Enum values come from the domain enums so the schema can
/// never drift from what the storefront parses.
#[must_use]
pub fn extraction_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "type": { "type": "STRING", "enum": WindowType::ALL.map(WindowType::label) },
            "width": { "type": "INTEGER" },
            "height": { "type": "INTEGER" },
            "material": { "type": "STRING", "enum": Material::ALL.map(Material::label) },
            "profile": { "type": "STRING", "enum": Profile::ALL.map(Profile::label) },
            "glass": { "type": "STRING", "enum": GlassType::ALL.map(GlassType::label) },
            "color": { "type": "STRING" },
            "hasGrilles": { "type": "BOOLEAN" },
        },
    })
}

/// System instruction for the chat assistant, grounded in the knowledge
/// base and strictly scoped to it.
#[must_use]
pub fn chat_system_instruction() -> String {
    format!(
        "Eres un asistente virtual experto llamado 'Ventanas Perfectas AI Assistant'. Tu \
         propósito es ayudar a los clientes con sus preguntas sobre ventanas, persianas y el \
         proceso de pedido.\n\
         - Tu base de conocimiento es ESTRICTAMENTE la información proporcionada a \
         continuación. NO inventes información que no esté aquí.\n\
         - Si no sabes la respuesta o la pregunta no está relacionada con el producto, responde \
         amablemente que no tienes esa información.\n\
         - Sé amable, profesional y conciso.\n\
         - Responde siempre en español.\n\n\
         --- INICIO DE LA BASE DE CONOCIMIENTO ---\n\
         {}\n\
         --- FIN DE LA BASE DE CONOCIMIENTO ---",
        content::chat_knowledge_base()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_schema_lists_wire_labels() {
        let schema = extraction_response_schema();
        let materials = schema["properties"]["material"]["enum"]
            .as_array()
            .expect("enum array");
        assert_eq!(materials.len(), Material::COUNT);
        assert!(materials.contains(&serde_json::json!("Aluminio")));

        let types = schema["properties"]["type"]["enum"]
            .as_array()
            .expect("enum array");
        assert!(types.contains(&serde_json::json!("Oscilobatiente")));
    }

    #[test]
    fn test_extraction_prompt_quotes_description() {
        let prompt = extraction_prompt("una ventana abatible de PVC blanco");
        assert!(prompt.contains("\"una ventana abatible de PVC blanco\""));
    }

    #[test]
    fn test_chat_system_instruction_embeds_knowledge_base() {
        let instruction = chat_system_instruction();
        assert!(instruction.contains("BASE DE CONOCIMIENTO"));
        assert!(instruction.contains("VEKA 70mm AD"));
        assert!(instruction.contains("Responde siempre en español"));
    }
}
