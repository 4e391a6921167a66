use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TOPIC_CAPACITY: usize = 100;
const DEFAULT_MAX_SUFFIX_ATTEMPTS: usize = 100;

/// Runtime configuration for the chat server, read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Buffered messages per room topic before slow subscribers start lagging
    pub topic_capacity: usize,
    /// Random-suffix attempts before falling back to a token suffix
    pub max_suffix_attempts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDR.to_string(),
            topic_capacity: DEFAULT_TOPIC_CAPACITY,
            max_suffix_attempts: DEFAULT_MAX_SUFFIX_ATTEMPTS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for missing or unparseable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            bind_address: lookup("CHAT_BIND_ADDR").unwrap_or(defaults.bind_address),
            topic_capacity: parse_or("CHAT_TOPIC_CAPACITY", &lookup, defaults.topic_capacity),
            max_suffix_attempts: parse_or(
                "CHAT_MAX_SUFFIX_ATTEMPTS",
                &lookup,
                defaults.max_suffix_attempts,
            ),
        }
    }
}

fn parse_or<F>(key: &str, lookup: &F, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.parse::<usize>() {
            // broadcast channels reject a zero capacity
            Ok(value) if value > 0 => value,
            _ => {
                warn!(key = %key, value = %raw, default, "Invalid config value, using default");
                default
            }
        },
        None => default,
    }
}
