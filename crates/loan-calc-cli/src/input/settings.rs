use loan_calc_core::settings::CalculatorSettings;

use super::file;

/// Load calculator settings from a JSON or YAML file, or fall back to the
/// built-in defaults when no file is given.
pub fn load_settings(path: Option<&str>) -> Result<CalculatorSettings, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(CalculatorSettings::default());
    };

    let (canonical, contents) = file::read_text(path)?;
    let is_yaml = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let settings = if is_yaml {
        CalculatorSettings::from_yaml(&contents)?
    } else {
        CalculatorSettings::from_json(&contents)?
    };
    tracing::info!(path = %canonical.display(), "loaded calculator settings");
    Ok(settings)
}
