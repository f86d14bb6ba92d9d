// [libs/infra/cracker/src/parser.rs]
/*!
 * APARATO: STREAMED STATUS PARSER
 * RESPONSABILIDAD: RECONOCER LAS CUATRO FAMILIAS DE LINEAS DE ESTADO DEL
 * CRACKER EXTERNO Y NORMALIZARLAS (§4.8 "Output parsing").
 *
 * Las expresiones regulares se compilan una sola vez (`once_cell::Lazy`)
 * porque el parser corre por cada linea de un stream potencialmente
 * largo.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static PROGRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Progress\.+:\s*\d+/\d+\s*\((\d+(?:\.\d+)?)%\)").unwrap());

static RESTORE_POINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Restore\.?Point\.+:\s*\d+/(\d+)").unwrap());

static SPEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Speed\.#\d+\.+:\s*([\d.]+)\s*(kH/s|MH/s|GH/s|H/s)").unwrap());

static ETA_ABSOLUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Time\.Estimated\.+:.*?\(([0-9]{2}:[0-9]{2}:[0-9]{2})\)").unwrap());

static ETA_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Time\.Estimated\.+:\s*(?:[A-Za-z]{3}\s+[A-Za-z]{3}\s+\d{1,2}\s+[\d:]+\s+\d{4})?\s*\(?([0-9]+\s*(?:days?|hrs?|mins?|secs?)(?:,?\s*[0-9]+\s*(?:days?|hrs?|mins?|secs?))*)\)?").unwrap()
});

/// Observacion mas reciente extraida del stream de estado del cracker.
/// Cada campo es independiente: una linea puede poblar solo uno de ellos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTick {
    pub progress: Option<u8>,
    pub total_words: Option<u64>,
    pub speed_hs: Option<u64>,
    pub eta: Option<String>,
}

fn normalize_speed(raw: &str, unit: &str) -> Option<u64> {
    let value: f64 = raw.parse().ok()?;
    let multiplier = match unit {
        "H/s" => 1.0,
        "kH/s" => 1_000.0,
        "MH/s" => 1_000_000.0,
        "GH/s" => 1_000_000_000.0,
        _ => return None,
    };
    Some((value * multiplier).round() as u64)
}

/// Parsea una unica linea de stdout, devolviendo `Some` con el campo que
/// reconocio (a lo sumo uno no-`None` por llamada; el llamador acumula
/// observaciones en su propio `StatusTick` corriente, §4.8: "propagate the
/// latest observation upstream").
pub fn parse_line(line: &str) -> Option<StatusTick> {
    if let Some(captures) = PROGRESS_RE.captures(line) {
        let percent: f64 = captures[1].parse().ok()?;
        return Some(StatusTick {
            progress: Some(percent.round().clamp(0.0, 100.0) as u8),
            ..Default::default()
        });
    }
    if let Some(captures) = RESTORE_POINT_RE.captures(line) {
        let total: u64 = captures[1].parse().ok()?;
        return Some(StatusTick {
            total_words: Some(total),
            ..Default::default()
        });
    }
    if let Some(captures) = SPEED_RE.captures(line) {
        let speed = normalize_speed(&captures[1], &captures[2])?;
        return Some(StatusTick {
            speed_hs: Some(speed),
            ..Default::default()
        });
    }
    if let Some(captures) = ETA_ABSOLUTE_RE.captures(line) {
        return Some(StatusTick {
            eta: Some(captures[1].to_string()),
            ..Default::default()
        });
    }
    if let Some(captures) = ETA_DURATION_RE.captures(line) {
        return Some(StatusTick {
            eta: Some(captures[1].trim().to_string()),
            ..Default::default()
        });
    }
    None
}

/// Fusiona una observacion nueva sobre el ultimo `StatusTick` conocido,
/// conservando los campos que la linea actual no toco.
pub fn merge(current: &mut StatusTick, incoming: StatusTick) {
    if incoming.progress.is_some() {
        current.progress = incoming.progress;
    }
    if incoming.total_words.is_some() {
        current.total_words = incoming.total_words;
    }
    if incoming.speed_hs.is_some() {
        current.speed_hs = incoming.speed_hs;
    }
    if incoming.eta.is_some() {
        current.eta = incoming.eta;
    }
}
