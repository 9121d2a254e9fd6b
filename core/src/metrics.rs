use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Prometheus-tellere for konverteringene.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub conversions_total: IntCounter,
    pub conversion_failures_total: IntCounter,
    pub activities_total: IntCounter,
    pub trackpoints_total: IntCounter,
    pub degenerate_values_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let conversions_total =
            IntCounter::new("tcx_conversions_total", "Fullførte TCX-konverteringer")?;
        let conversion_failures_total =
            IntCounter::new("tcx_conversion_failures_total", "Konverteringer som feilet")?;
        let activities_total =
            IntCounter::new("tcx_activities_total", "Aktiviteter skrevet til grafen")?;
        let trackpoints_total =
            IntCounter::new("tcx_trackpoints_total", "Trackpoints skrevet til grafen")?;
        let degenerate_values_total = IntCounterVec::new(
            Opts::new("tcx_degenerate_values_total", "Ikke-endelige tallverdier per predikat"),
            &["predicate"],
        )?;

        registry.register(Box::new(conversions_total.clone()))?;
        registry.register(Box::new(conversion_failures_total.clone()))?;
        registry.register(Box::new(activities_total.clone()))?;
        registry.register(Box::new(trackpoints_total.clone()))?;
        registry.register(Box::new(degenerate_values_total.clone()))?;

        Ok(Self {
            registry,
            conversions_total,
            conversion_failures_total,
            activities_total,
            trackpoints_total,
            degenerate_values_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Tekstformat (Prometheus exposition).
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("conversions_total", &self.conversions_total.get())
            .field("conversion_failures_total", &self.conversion_failures_total.get())
            .field("activities_total", &self.activities_total.get())
            .field("trackpoints_total", &self.trackpoints_total.get())
            .finish()
    }
}

/// Prosessens felles tellere (brukt av `convert_tcx_to_ttl` og Python-bindingen).
pub static METRICS: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("static metric definitions are valid"));
