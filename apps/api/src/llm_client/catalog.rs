//! The fixed list of models a user can switch between.

use serde::Serialize;

use super::ProviderKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub provider: ProviderKind,
    pub model: &'static str,
    pub label: &'static str,
    /// Maximum input size in tokens; inputs above this are rejected locally.
    pub context_window: usize,
}

/// The first entry per provider is that provider's default.
pub const CATALOG: &[ModelSpec] = &[
    ModelSpec {
        provider: ProviderKind::Anthropic,
        model: "claude-sonnet-4-5",
        label: "Claude Sonnet 4.5",
        context_window: 200_000,
    },
    ModelSpec {
        provider: ProviderKind::Anthropic,
        model: "claude-haiku-4-5",
        label: "Claude Haiku 4.5",
        context_window: 200_000,
    },
    ModelSpec {
        provider: ProviderKind::OpenAi,
        model: "gpt-4o",
        label: "GPT-4o",
        context_window: 128_000,
    },
    ModelSpec {
        provider: ProviderKind::OpenAi,
        model: "gpt-4o-mini",
        label: "GPT-4o mini",
        context_window: 128_000,
    },
    ModelSpec {
        provider: ProviderKind::OpenAi,
        model: "gpt-3.5-turbo",
        label: "GPT-3.5 Turbo",
        context_window: 16_385,
    },
    ModelSpec {
        provider: ProviderKind::Groq,
        model: "llama-3.3-70b-versatile",
        label: "Llama 3.3 70B (Groq)",
        context_window: 131_072,
    },
    ModelSpec {
        provider: ProviderKind::Groq,
        model: "llama-3.1-8b-instant",
        label: "Llama 3.1 8B Instant (Groq)",
        context_window: 131_072,
    },
];

pub fn find(provider: ProviderKind, model: &str) -> Option<&'static ModelSpec> {
    CATALOG
        .iter()
        .find(|spec| spec.provider == provider && spec.model == model)
}

pub fn default_for(provider: ProviderKind) -> &'static ModelSpec {
    CATALOG
        .iter()
        .find(|spec| spec.provider == provider)
        .unwrap_or(&CATALOG[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_provider_has_a_default() {
        for kind in [ProviderKind::Anthropic, ProviderKind::OpenAi, ProviderKind::Groq] {
            assert_eq!(default_for(kind).provider, kind);
        }
    }

    #[test]
    fn test_find_requires_matching_provider() {
        assert!(find(ProviderKind::OpenAi, "gpt-4o").is_some());
        assert!(find(ProviderKind::Anthropic, "gpt-4o").is_none());
    }

    #[test]
    fn test_catalog_entries_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert!(!(a.provider == b.provider && a.model == b.model));
            }
        }
    }
}
