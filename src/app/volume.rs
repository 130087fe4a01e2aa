/// The one volume level behind both the slider and the mute icon.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeControl {
    level: f32,
    /// Level the mute icon restores to.
    unmute_level: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Audible,
}

impl VolumeControl {
    pub fn new(unmute_level: f32) -> Self {
        Self {
            level: 1.0,
            unmute_level: clamp_level(unmute_level),
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.level <= 0.0
    }

    /// Slider position, 0..=100.
    pub fn percent(&self) -> u8 {
        (self.level * 100.0).round() as u8
    }

    pub fn icon(&self) -> VolumeIcon {
        if self.is_muted() {
            VolumeIcon::Muted
        } else {
            VolumeIcon::Audible
        }
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Slider input: whole percent steps.
    pub fn set_percent(&mut self, percent: u8) {
        self.set_level(f32::from(percent.min(100)) / 100.0);
    }

    pub fn step(&mut self, delta: f32) {
        let stepped = self.level + delta;
        // Snap to whole percents so repeated steps don't drift.
        self.set_level((stepped * 100.0).round() / 100.0);
    }

    /// Mute icon click: silent when audible, back to the unmute level otherwise.
    pub fn toggle_mute(&mut self) {
        self.level = if self.is_muted() { self.unmute_level } else { 0.0 };
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) }
}
