/// Typet arbeidsmodell for et TCX-dokument, hentet ut av `extract`.
/// Numeriske felt som mangler i kilden er NaN (ikke Option); de skal
/// fortsatt ut som literaler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workout {
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    /// `Sport`-attributtet, "Activity" hvis det mangler.
    pub sport: String,
    /// `<Id>`, i TCX normalt starttidspunktet.
    pub id: Option<String>,
    pub laps: Vec<Lap>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    pub avg_hr: f64,          // bpm
    pub max_hr: f64,          // bpm
    pub total_time_s: f64,    // sek
    pub distance_m: f64,      // meter
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub trackpoints: Vec<Trackpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trackpoint {
    pub time: String,
    pub latitude: f64,   // grader
    pub longitude: f64,  // grader
    pub heart_rate: f64, // bpm
    pub power: f64,      // watt
}

impl Activity {
    /// Alle trackpoints over alle laps/tracks, i dokumentrekkefølge.
    pub fn trackpoints(&self) -> Vec<&Trackpoint> {
        self.laps
            .iter()
            .flat_map(|lap| lap.tracks.iter())
            .flat_map(|track| track.trackpoints.iter())
            .collect()
    }

    /// "Biking activity on 2024-04-14" / "Biking activity".
    pub fn title(&self) -> String {
        match self.id.as_deref() {
            Some(id) => {
                let date: String = id.chars().take(10).collect();
                format!("{} activity on {}", self.sport, date)
            }
            None => format!("{} activity", self.sport),
        }
    }
}
