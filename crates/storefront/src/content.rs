//! Static storefront content.
//!
//! The product knowledge base (shared between the FAQ endpoint and the chat
//! assistant's grounding), the assistant's fixed messages, and the invoice
//! payment block.

use serde::Serialize;

/// Company name printed on invoices.
pub const COMPANY_NAME: &str = "Ventanas Perfectas S.L.";

/// Company address printed on invoices.
pub const COMPANY_ADDRESS: &str = "C/ de la Innovación, 123, 28080 Madrid";

/// Greeting the assistant opens every chat with.
pub const CHAT_GREETING: &str =
    "¡Hola! Soy tu asistente de IA. ¿En qué puedo ayudarte con tu pedido de ventanas?";

/// Fixed note appended to a chat message when the stream drops mid-response.
pub const CHAT_ERROR_NOTE: &str =
    "Lo siento, ha ocurrido un error. Por favor, inténtalo de nuevo más tarde.";

/// Message shown when the configuration extraction fails.
pub const EXTRACTION_ERROR_NOTE: &str =
    "No se pudo procesar la descripción. Inténtalo de nuevo.";

/// Bank-transfer instructions shown on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentInstructions {
    #[serde(rename = "accountHolder")]
    pub account_holder: &'static str,
    pub iban: &'static str,
    pub bank: &'static str,
    /// Transfer concept the customer must quote, e.g. "Pedido VP-1234".
    pub reference: String,
}

impl PaymentInstructions {
    /// Instructions for a specific order.
    #[must_use]
    pub fn for_order(order_number: &str) -> Self {
        Self {
            account_holder: COMPANY_NAME,
            iban: "ES00 1234 5678 9012 3456 7890",
            bank: "Banco Ficticio S.A.",
            reference: format!("Pedido {order_number}"),
        }
    }
}

/// A frequently asked question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

/// The storefront FAQ, also folded into the chat knowledge base.
pub const FAQ_ENTRIES: [FaqEntry; 5] = [
    FaqEntry {
        question: "¿Las ventanas se entregan montadas?",
        answer: "Sí, nuestras ventanas se entregan completamente ensambladas, con el cristal \
                 instalado y los herrajes montados, listas para su instalación en obra.",
    },
    FaqEntry {
        question: "¿Qué necesito para descargar las ventanas en la obra?",
        answer: "La entrega se realiza a pie de camión. Para pedidos grandes o ventanas de gran \
                 formato, el cliente debe disponer de los medios mecánicos (elevador, grúa) y el \
                 personal necesarios para la descarga segura.",
    },
    FaqEntry {
        question: "¿Qué incluye el pedido exactamente?",
        answer: "Cada ventana incluye el marco, la hoja con el acristalamiento seleccionado y \
                 todos los herrajes ya instalados. No incluye tornillería de fijación al muro ni \
                 materiales de sellado, que debe seleccionar el instalador.",
    },
    FaqEntry {
        question: "¿Cuál es el plazo de entrega estimado?",
        answer: "Tras la confirmación del pago el pedido entra en producción. El plazo de \
                 fabricación estimado es de 15 días laborables, más el tiempo de transporte según \
                 la dirección de entrega.",
    },
    FaqEntry {
        question: "¿Puedo cancelar o modificar mi pedido?",
        answer: "No es posible una vez que el pedido ha entrado en producción (tras la \
                 confirmación del pago), ya que cada ventana se fabrica a medida. Revisa todos \
                 los detalles de la factura antes de pagar.",
    },
];

/// Condensed technical summary grounding the chat assistant.
pub const KNOWLEDGE_BASE: &str = "\
Resumen Técnico de Sistemas de Ventanas y Persianas Enrollables

1. Sistemas de Ventanas PVC (VEKA AG)
- Modelos Principales: VEKA 70mm AD (Softline, Topline, Schwingline) y Softline 70/82 AD+MD.
- Tipos de Construcción: Ventanas de 1 o 2 hojas, abatibles, oscilobatientes, fijas, etc.
- Material del Marco: PVC-U conforme a RAL-GZ 716.
- Características Técnicas:
  - Permeabilidad al Aire: Clase 4 (alta estanqueidad).
  - Resistencia al Viento: Hasta C5/B5 (alta resistencia).
  - Estanqueidad al Agua: Hasta 9A (protección contra lluvia intensa).
  - Aislamiento Acústico: Hasta 44 dB.
  - Resistencia al Robo: Hasta WK 2 (RC 2).
- Certificaciones: RAL System Passport y Certificado ift para \"Vikonenko\" GmbH válido hasta 22.09.2027.

2. Sistemas de Persianas Enrollables Adaptativas (Aluprof)
- Descripción: Para edificios existentes, sin alterar la estructura.
- Perfiles: Aluminio con espuma, extrudidos (PE) y PVC (PT).
- Accionamientos: Manuales y eléctricos (motores, mandos a distancia, control inteligente).
- Beneficios: Fácil instalación, aislamiento acústico y térmico superior (reduce costos de \
calefacción hasta 30%), protección solar y de seguridad. Sistema antimosquitos (Moskito) opcional.

3. Sistemas de Persianas Enrollables Superpuestas (Aluprof)
- Descripción: Se integran en la ventana durante la fabricación.
- Aislamiento Térmico: Coeficiente Usb de 0,59-0,66 W/(m²K).
- Estabilidad: Refuerzos de acero para persianas anchas.
- Beneficios: Ideal para proyectos complejos, alta rigidez, mejora estética y eficiencia energética.";

/// The knowledge base plus the FAQ, as handed to the chat model.
#[must_use]
pub fn chat_knowledge_base() -> String {
    use std::fmt::Write;

    let mut base = String::from(KNOWLEDGE_BASE);
    base.push_str("\n\nPreguntas Frecuentes (FAQ)\n");
    for entry in FAQ_ENTRIES {
        let _ = write!(base, "\n- {} {}", entry.question, entry.answer);
    }
    base
}
