// ============================================================================
// Formatage des valeurs affichées
// ============================================================================
// Les fournisseurs renvoient des nombres ou des chaînes JSON ; le tableau de
// bord n'affiche que du texte.
// ============================================================================

use serde_json::Value;

/// Formate un nombre à la manière d'un navigateur en-US
///
/// Séparateur de milliers ',' et au plus 3 décimales, sans zéros inutiles :
/// 65000 -> "65,000", 1234.5 -> "1,234.5", 0.12345 -> "0.123"
pub fn locale_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }

    // Insère une virgule toutes les 3 positions en partant de la droite
    let len = int_part.len();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Convertit un ratio en pourcentage à deux décimales
///
/// 0.0523 -> "5.23%"
pub fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Rend une valeur JSON scalaire en texte
///
/// Chaînes telles quelles, nombres comme une interpolation JavaScript
/// ("42", "12.5"). Null, booléens, tableaux, objets et chaînes vides sont
/// considérés comme absents.
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(uint) = number.as_u64() {
                Some(uint.to_string())
            } else {
                // Display de f64 : pas d'exposant ni de ".0" pour les entiers
                number.as_f64().map(|float| float.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_locale_number_groups_thousands() {
        assert_eq!(locale_number(65000.0), "65,000");
        assert_eq!(locale_number(1234567.891), "1,234,567.891");
        assert_eq!(locale_number(999.0), "999");
        assert_eq!(locale_number(1000.0), "1,000");
    }

    #[test]
    fn test_locale_number_fraction_digits() {
        assert_eq!(locale_number(3400.5), "3,400.5");
        assert_eq!(locale_number(0.12345), "0.123");
        assert_eq!(locale_number(0.0), "0");
    }

    #[test]
    fn test_locale_number_negative() {
        assert_eq!(locale_number(-1234.25), "-1,234.25");
        assert_eq!(locale_number(-0.0001), "0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0523), "5.23%");
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn test_scalar() {
        assert_eq!(scalar(&json!("42")).as_deref(), Some("42"));
        assert_eq!(scalar(&json!(42)).as_deref(), Some("42"));
        assert_eq!(scalar(&json!(12.5)).as_deref(), Some("12.5"));
        assert_eq!(scalar(&json!(-3.0)).as_deref(), Some("-3"));
        assert_eq!(scalar(&json!(0)).as_deref(), Some("0"));
        assert_eq!(scalar(&json!("")), None);
        assert_eq!(scalar(&Value::Null), None);
        assert_eq!(scalar(&json!([1])), None);
    }
}
