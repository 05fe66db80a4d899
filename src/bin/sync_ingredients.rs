//! Pull an ingredient listing from a remote API and check every record
//!
//! Usage: `sync_ingredients [URL]` (falls back to `NUTRIKIT_INGREDIENT_URL`).
//! Prints a JSON summary to stdout; logs go to stderr.

use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use nutrikit::build_info::BuildInfo;
use nutrikit::fetch::{FetchConfig, Paginator};
use nutrikit::models::{Ingredient, IngredientCreate, SubmitterTier};

const ENV_INGREDIENT_URL: &str = "NUTRIKIT_INGREDIENT_URL";

#[derive(Debug, Serialize)]
struct RejectedIngredient {
    name: Option<String>,
    reasons: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SyncSummary {
    source: String,
    user_agent: String,
    fetched: usize,
    accepted: usize,
    rejected: Vec<RejectedIngredient>,
}

fn get_source_url() -> Option<String> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_INGREDIENT_URL).ok())
        .filter(|url| !url.trim().is_empty())
}

/// Turn one listing entry into an ingredient, or the reasons it was refused
fn check_entry(entry: Value) -> Result<Ingredient, RejectedIngredient> {
    let name = entry.get("name").and_then(Value::as_str).map(str::to_string);

    let data: IngredientCreate = serde_json::from_value(entry).map_err(|e| RejectedIngredient {
        name: name.clone(),
        reasons: vec![format!("Unreadable record: {}", e)],
    })?;

    Ingredient::create(data, SubmitterTier::Trusted).map_err(|errors| RejectedIngredient {
        name,
        reasons: errors.errors().iter().map(ToString::to_string).collect(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrikit=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let info = BuildInfo::current();
    tracing::info!("{} {} (built {})", info.name, info.version, info.build_timestamp);

    let url = get_source_url()
        .ok_or_else(|| format!("No source URL given (pass one or set {})", ENV_INGREDIENT_URL))?;

    let config = FetchConfig::from_env();
    let user_agent = config.user_agent.clone();
    let paginator = Paginator::new(config)?;

    let entries = paginator.fetch_all(&url, None)?;
    let fetched = entries.len();

    let mut accepted = 0;
    let mut rejected = Vec::new();
    for entry in entries {
        match check_entry(entry) {
            Ok(_) => accepted += 1,
            Err(refusal) => {
                tracing::warn!(
                    "Rejected ingredient {}: {}",
                    refusal.name.as_deref().unwrap_or("<unnamed>"),
                    refusal.reasons.join("; ")
                );
                rejected.push(refusal);
            }
        }
    }

    let summary = SyncSummary {
        source: url,
        user_agent,
        fetched,
        accepted,
        rejected,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, energy: &str, protein: &str) -> Value {
        json!({
            "id": 7,
            "name": name,
            "energy": energy,
            "protein": protein,
            "carbohydrates": "10",
            "fat": "10",
            "fiber": null,
            "license": 1,
            "license_author": "test"
        })
    }

    #[test]
    fn test_valid_entry_is_accepted() {
        // 20*4 + 10*4 + 10*9 = 210 kcal
        let ingredient = check_entry(entry("Chicken breast", "200", "20")).unwrap();
        assert_eq!(ingredient.name, "Chicken breast");
        assert!(!ingredient.is_pending());
    }

    #[test]
    fn test_unreadable_entry_is_rejected() {
        let refusal = check_entry(json!({"name": "Broken", "energy": "lots", "license": 1})).unwrap_err();
        assert_eq!(refusal.name.as_deref(), Some("Broken"));
        assert_eq!(refusal.reasons.len(), 1);
        assert!(refusal.reasons[0].starts_with("Unreadable record"));

        let refusal = check_entry(json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(refusal.name, None);
    }

    #[test]
    fn test_short_name_is_rejected() {
        let refusal = check_entry(entry("Ui", "200", "20")).unwrap_err();
        assert_eq!(refusal.name.as_deref(), Some("Ui"));
        assert_eq!(refusal.reasons.len(), 1);
        assert!(refusal.reasons[0].contains("at least 3 characters"));
    }

    #[test]
    fn test_energy_mismatch_is_rejected() {
        let refusal = check_entry(entry("Chicken breast", "50", "20")).unwrap_err();
        assert_eq!(refusal.reasons.len(), 1);
        assert!(refusal.reasons[0].contains("total energy"));
    }

    #[test]
    fn test_huge_values_are_rejected_without_panicking() {
        let refusal =
            check_entry(entry("Huge", "10000000000000000000000000000", "10")).unwrap_err();
        assert!(refusal.reasons.iter().any(|r| r.contains("too large")));
    }
}
