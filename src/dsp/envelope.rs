//! ADSR gain envelope built from declaration-ordered automation events.
//!
//! The envelope is scheduled the same way a WebAudio `AudioParam` was in
//! the browser front-end: five events appended in a fixed order
//! (set 0, ramp to 1, ramp to sustain, set sustain, ramp to 0). Events are
//! NOT sorted by time. Each one paints its span of the gain curve and later
//! events overwrite earlier ones, so overlapping segments (attack + decay
//! past the release start) resolve deterministically.

/// One gain automation event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Automation {
    /// Jump to `value` at `time` and hold it.
    Set { time: f64, value: f64 },
    /// Ramp linearly from the previous event's (time, value) to
    /// (`time`, `value`), then hold `value`.
    LinearRamp { time: f64, value: f64 },
}

impl Automation {
    fn time(&self) -> f64 {
        match *self {
            Automation::Set { time, .. } | Automation::LinearRamp { time, .. } => time,
        }
    }

    fn value(&self) -> f64 {
        match *self {
            Automation::Set { value, .. } | Automation::LinearRamp { value, .. } => value,
        }
    }
}

/// ADSR envelope over a fixed-length render.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level [0, 1].
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Total render length in seconds.
    pub duration: f64,
}

impl Envelope {
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64, duration: f64) -> Self {
        Envelope {
            attack,
            decay,
            sustain,
            release,
            duration,
        }
    }

    /// Automation events in declaration order.
    pub fn schedule(&self) -> [Automation; 5] {
        let attack_end = self.attack;
        let decay_end = attack_end + self.decay;
        let end = self.duration;
        [
            Automation::Set { time: 0.0, value: 0.0 },
            Automation::LinearRamp { time: attack_end, value: 1.0 },
            Automation::LinearRamp { time: decay_end, value: self.sustain },
            Automation::Set { time: end - self.release, value: self.sustain },
            Automation::LinearRamp { time: end, value: 0.0 },
        ]
    }

    /// Render `len` gain values at `sample_rate`.
    pub fn render(&self, len: usize, sample_rate: f64) -> Vec<f64> {
        let mut gain = vec![0.0; len];
        let schedule = self.schedule();

        let mut prev: Option<Automation> = None;
        for event in schedule {
            match event {
                Automation::Set { time, value } => {
                    for (i, g) in gain.iter_mut().enumerate() {
                        if i as f64 / sample_rate >= time {
                            *g = value;
                        }
                    }
                }
                Automation::LinearRamp { time: t1, value: v1 } => {
                    let (t0, v0) = prev.map_or((0.0, 0.0), |p| (p.time(), p.value()));
                    let span = t1 - t0;
                    for (i, g) in gain.iter_mut().enumerate() {
                        let t = i as f64 / sample_rate;
                        if t >= t1 {
                            *g = v1;
                        } else if t >= t0 && span > 0.0 {
                            *g = v0 + (v1 - v0) * (t - t0) / span;
                        }
                    }
                }
            }
            prev = Some(event);
        }

        gain
    }
}
