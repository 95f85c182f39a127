//! Static catalogs of selectable models.

/// A selectable model and its speed/quality trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub(crate) const GROQ_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "llama-3.3-70b-versatile",
        display_name: "Llama 3.3 70B Versatile",
        description: "Highest quality for drafting and analysis, moderate speed",
    },
    ModelInfo {
        id: "llama-3.1-8b-instant",
        display_name: "Llama 3.1 8B Instant",
        description: "Fastest responses, best for short rewrites and summaries",
    },
    ModelInfo {
        id: "gemma2-9b-it",
        display_name: "Gemma 2 9B",
        description: "Balanced speed and quality for everyday prompts",
    },
    ModelInfo {
        id: "mixtral-8x7b-32768",
        display_name: "Mixtral 8x7B",
        description: "32k context window for long documents, slower",
    },
    ModelInfo {
        id: "deepseek-r1-distill-llama-70b",
        display_name: "DeepSeek R1 Distill Llama 70B",
        description: "Step-by-step reasoning, slowest of the catalog",
    },
];

pub(crate) const OPENAI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gpt-4o-mini",
        display_name: "GPT-4o mini",
        description: "Fast and inexpensive, good default for most tasks",
    },
    ModelInfo {
        id: "gpt-4o",
        display_name: "GPT-4o",
        description: "High quality multimodal model, moderate speed",
    },
    ModelInfo {
        id: "gpt-4.1-mini",
        display_name: "GPT-4.1 mini",
        description: "Long context at low latency",
    },
    ModelInfo {
        id: "gpt-4.1",
        display_name: "GPT-4.1",
        description: "Highest quality for complex instructions, slower",
    },
];
