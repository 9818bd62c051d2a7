use serde_json::{json, Value};

/// Instruction sent with every request; `{url}` is the only variable part.
pub fn instruction(target_url: &str) -> String {
    format!(
        "Analiza el sitio web {target_url}.\n\
         Tu tarea es diseñar un manual profesional a partir de este sitio.\n\
         \n\
         Describe primero, como experto en captura web, los pasos técnicos de captura \
         que recomendarías para este dominio.\n\
         \n\
         Define una estructura lógica de capítulos (Introducción, Características, \
         Documentación Técnica, Guías de Uso, etc.).\n\
         Para cada capítulo, identifica URLs hipotéticas o reales del sitio que encajarían.\n\
         El resultado debe ser un manual coherente, no solo una lista de páginas."
    )
}

/// Response schema handed to the model. Advisory only: replies are validated
/// again on arrival.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "siteTitle": { "type": "STRING" },
            "totalEstimatedPages": { "type": "INTEGER" },
            "scrapingStrategy": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Pasos técnicos de captura recomendados para este dominio."
            },
            "chapters": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "pages": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "title": { "type": "STRING" },
                                    "url": { "type": "STRING" },
                                    "relevance": { "type": "NUMBER" },
                                    "description": { "type": "STRING" }
                                },
                                "required": ["title", "url"]
                            }
                        }
                    },
                    "required": ["id", "title", "pages"]
                }
            }
        },
        "required": ["siteTitle", "chapters", "scrapingStrategy"]
    })
}

/// Full `generateContent` request body.
pub fn request_body(target_url: &str, thinking_budget: u32, search_grounding: bool) -> Value {
    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": instruction(target_url) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
            "thinkingConfig": { "thinkingBudget": thinking_budget }
        }
    });

    if search_grounding {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("tools".to_owned(), json!([{ "googleSearch": {} }]));
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_embeds_url_verbatim() {
        let text = instruction("docs.example.com/intro?x=1");
        assert!(text.starts_with("Analiza el sitio web docs.example.com/intro?x=1."));
    }

    #[test]
    fn schema_marks_mandatory_fields() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            json!(["siteTitle", "chapters", "scrapingStrategy"])
        );
        let chapter = &schema["properties"]["chapters"]["items"];
        assert_eq!(chapter["required"], json!(["id", "title", "pages"]));
        assert_eq!(
            chapter["properties"]["pages"]["items"]["required"],
            json!(["title", "url"])
        );
    }

    #[test]
    fn body_carries_budget_and_optional_search_tool() {
        let body = request_body("https://a", 1024, false);
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            json!(1024)
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            json!("application/json")
        );
        assert!(body.get("tools").is_none());

        let body = request_body("https://a", 1024, true);
        assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
    }
}
