use crate::models::{Lap, Trackpoint};

/// Startverdi for maks-puls; blir stående hvis ingen lap har en gyldig verdi.
pub const MAX_HR_SENTINEL: f64 = -1.0;

/// Tidsvektet snittpuls: Σ(avg_hr · tid) / Σ tid.
/// Null total tid gir NaN (0/0); dagens oppførsel, skrives ut som literal.
pub fn average_heart_rate(laps: &[Lap]) -> f64 {
    let mut total_beats = 0.0f64;
    let mut total_time = 0.0f64;
    for lap in laps {
        total_beats += lap.total_time_s * lap.avg_hr;
        total_time += lap.total_time_s;
    }
    total_beats / total_time
}

/// Høyeste lap-maks. NaN vinner aldri sammenligningen.
pub fn max_heart_rate(laps: &[Lap]) -> f64 {
    let mut max = MAX_HR_SENTINEL;
    for lap in laps {
        if lap.max_hr > max {
            max = lap.max_hr;
        }
    }
    max
}

pub fn total_duration_secs(laps: &[Lap]) -> f64 {
    laps.iter().map(|l| l.total_time_s).sum()
}

/// Sum av lap-tid som xsd:duration.
pub fn total_duration(laps: &[Lap]) -> String {
    format_xsd_duration(total_duration_secs(laps))
}

/// Sekunder -> `PT<h>H<m>M<s>S`, kun komponenter som ikke er null.
///
/// Negative eller ikke-numeriske verdier klemmes til 0 etter avrunding til
/// hele sekunder. Null blir bare `"PT"` (ingen komponenter), ikke gyldig
/// xsd:duration, men det er formatet konsumentene får i dag.
pub fn format_xsd_duration(seconds: f64) -> String {
    let secs = if seconds.is_finite() { seconds.round().max(0.0) as u64 } else { 0 };
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    let mut out = String::from("PT");
    if h > 0 {
        out.push_str(&format!("{h}H"));
    }
    if m > 0 {
        out.push_str(&format!("{m}M"));
    }
    if s > 0 {
        out.push_str(&format!("{s}S"));
    }
    out
}

pub fn total_distance(laps: &[Lap]) -> f64 {
    laps.iter().map(|l| l.distance_m).sum()
}

/// Snitteffekt over flatet trackpoint-liste.
///
/// NB: summerer fra indeks 1 (første sample tas aldri med) men deler på
/// totalt antall. Gir systematisk for lavt snitt; beholdt for kompatibilitet
/// med eksisterende data. Under to samples -> None (ingen triple).
pub fn mean_power(trackpoints: &[&Trackpoint]) -> Option<f64> {
    let n = trackpoints.len();
    if n < 2 {
        return None;
    }
    let sum: f64 = trackpoints[1..].iter().map(|tp| tp.power).sum();
    Some(sum / n as f64)
}
