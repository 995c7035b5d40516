use anyhow::Context;

/// Keyring service name. Changing it orphans stored keys.
const SERVICE: &str = "emojiassist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    LlmApiKey,
    ElevenLabsApiKey,
}

impl SecretKey {
    fn user(self) -> &'static str {
        match self {
            SecretKey::LlmApiKey => "llm_api_key",
            SecretKey::ElevenLabsApiKey => "elevenlabs_api_key",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            SecretKey::LlmApiKey => "LLM_API_KEY",
            SecretKey::ElevenLabsApiKey => "ELEVENLABS_API_KEY",
        }
    }
}

pub fn set_secret(key: SecretKey, value: &str) -> anyhow::Result<()> {
    let entry = keyring::Entry::new(SERVICE, key.user()).context("create keyring entry")?;
    entry.set_password(value).context("set secret")
}

pub fn get_secret(key: SecretKey) -> anyhow::Result<Option<String>> {
    let entry = keyring::Entry::new(SERVICE, key.user()).context("create keyring entry")?;

    match entry.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)).context("get secret"),
    }
}

pub fn delete_secret(key: SecretKey) -> anyhow::Result<()> {
    let entry = keyring::Entry::new(SERVICE, key.user()).context("create keyring entry")?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)).context("delete secret"),
    }
}

/// Environment first, then the keyring. A keyring that can't be reached (headless
/// Linux, CI) counts as "no key" rather than an error.
pub fn resolve_secret(key: SecretKey) -> String {
    resolve_with(key, |name| std::env::var(name).ok(), get_secret)
}

fn resolve_with(
    key: SecretKey,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(SecretKey) -> anyhow::Result<Option<String>>,
) -> String {
    if let Some(v) = env(key.env_var()).filter(|v| !v.trim().is_empty()) {
        return v.trim().to_string();
    }
    match keyring(key) {
        Ok(v) => v.unwrap_or_default(),
        Err(e) => {
            log::warn!("keyring unavailable for {}: {e:#}", key.user());
            String::new()
        }
    }
}
