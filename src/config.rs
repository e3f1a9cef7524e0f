use core::time::Duration;

macro_rules! env_or_default {
    ($name:expr, $default:expr) => {
        if let Some(s) = option_env!($name) {
            s
        } else {
            $default
        }
    };
}

pub const SURVEY_URL: &str = env_or_default!("GRADCAFE_URL", "https://www.thegradcafe.com/survey/");
pub const OUTPUT_DIR: &str = env_or_default!("GRADCAFE_OUTPUT_DIR", "output_csv");
pub const PAGE_DELAY: Duration = Duration::from_millis(500);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
