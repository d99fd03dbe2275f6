//! Insight prompts for herd analysis.
//!
//! The prompt is written in Portuguese because the generated text is shown
//! verbatim to the farm operator.

use serde::{Deserialize, Serialize};

/// Role the model is asked to play.
pub const SYSTEM_PROMPT: &str = "Como um consultor veterinário e gestor rural experiente, \
analise estes dados da fazenda e forneça 3 insights rápidos e acionáveis:";

/// Closing instructions appended after the herd figures.
pub const FOCUS_INSTRUCTIONS: &str = "Foque em produtividade, sanidade e manejo de pastagens. \
Responda em português de forma concisa e profissional.";

/// Herd figures summarized into the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HerdSnapshot {
    /// Number of registered animals
    pub total_animals: usize,
    /// Number of lots (active or archived)
    pub lot_count: usize,
    /// Mean liters per milk record, 0 when there are none
    pub average_milk_liters: f64,
    /// Health records currently under treatment
    pub under_treatment: usize,
}

/// Build the insight prompt for a herd snapshot.
pub fn build_insight_prompt(snapshot: &HerdSnapshot) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\
         - Total de animais: {}\n\
         - Lotes ativos: {}\n\
         - Produção de leite média: {} L\n\
         - Registros de saúde: {} animais em tratamento.\n\
         {FOCUS_INSTRUCTIONS}",
        snapshot.total_animals,
        snapshot.lot_count,
        format_liters(snapshot.average_milk_liters),
        snapshot.under_treatment,
    )
}

/// Whole liters print without a decimal part, everything else with one digit.
fn format_liters(liters: f64) -> String {
    if liters.fract() == 0.0 {
        format!("{liters:.0}")
    } else {
        format!("{liters:.1}")
    }
}
