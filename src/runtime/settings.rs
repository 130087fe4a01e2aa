use crate::config;

/// Load settings and apply the optional base-URL argument.
///
/// Never fails: problems fall back to defaults and come back as warnings,
/// to be reported once logging is up.
pub fn load_settings(base_url_arg: Option<String>) -> (config::Settings, Vec<String>) {
    let mut warnings = Vec::new();

    let mut settings = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warnings.push(format!("invalid config, using defaults: {msg}"));
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            warnings.push(format!("failed to load config, using defaults: {e}"));
            config::Settings::default()
        }
    };

    if let Some(url) = base_url_arg {
        if let Err(msg) = apply_base_url(&mut settings, url) {
            warnings.push(format!("ignoring base URL argument: {msg}"));
        }
    }

    (settings, warnings)
}

/// Override `server.base_url`, keeping the previous value if the result does
/// not validate.
fn apply_base_url(settings: &mut config::Settings, url: String) -> Result<(), String> {
    let previous = std::mem::replace(&mut settings.server.base_url, url);
    let result = settings.validate();
    if result.is_err() {
        settings.server.base_url = previous;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_argument_overrides_only_when_valid() {
        let mut settings = config::Settings::default();

        apply_base_url(&mut settings, "http://music.local:9000".into()).unwrap();
        assert_eq!(settings.server.base_url, "http://music.local:9000");

        assert!(apply_base_url(&mut settings, "not a url".into()).is_err());
        assert_eq!(settings.server.base_url, "http://music.local:9000");
    }
}
