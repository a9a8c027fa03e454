use serde::Deserialize;
use validator::Validate;

use crate::domain::settings::UpdateSiteSettings;
use crate::forms::empty_as_none;

#[derive(Debug, Deserialize, Validate)]
/// Site settings form; an unchecked checkbox is simply absent.
pub struct SiteSettingsForm {
    #[serde(default)]
    pub maintenance: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

impl SiteSettingsForm {
    pub fn maintenance_enabled(&self) -> bool {
        matches!(
            self.maintenance.as_deref(),
            Some("on" | "true" | "1" | "yes")
        )
    }
}

impl From<SiteSettingsForm> for UpdateSiteSettings {
    fn from(form: SiteSettingsForm) -> Self {
        UpdateSiteSettings::new(form.maintenance_enabled(), form.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_maps_to_flag() {
        let form: SiteSettingsForm =
            serde_html_form::from_str("maintenance=on&message=Back+soon").unwrap();
        let update = UpdateSiteSettings::from(form);
        assert!(update.maintenance);
        assert_eq!(update.message.as_deref(), Some("Back soon"));

        let form: SiteSettingsForm = serde_html_form::from_str("message=").unwrap();
        let update = UpdateSiteSettings::from(form);
        assert!(!update.maintenance);
        assert!(update.message.is_none());
    }
}
