//! Persona roster service.
//!
//! Keeps the list of personas and the active selection in the key-value
//! store. The roster is never empty: an empty store is seeded with the
//! default companion, and the last persona cannot be deleted.

use studymate_types::emotion::EmotionLabel;
use studymate_types::error::PersonaError;
use studymate_types::persona::{CreatePersonaRequest, Persona, PersonaId};

use crate::storage::kv_store::{KvStore, KEY_ACTIVE_CHARACTER, KEY_CHARACTERS};

/// Service managing the persona roster.
///
/// Generic over the `KvStore` port -- studymate-core never depends on
/// studymate-infra.
pub struct PersonaRoster<K: KvStore> {
    kv: K,
}

impl<K: KvStore> PersonaRoster<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// All personas in creation order, seeding the default on first use.
    pub async fn list(&self) -> Result<Vec<Persona>, PersonaError> {
        let stored = match self.kv.get(KEY_CHARACTERS).await? {
            Some(value) => serde_json::from_value::<Vec<Persona>>(value)
                .map_err(|e| PersonaError::StorageError(format!("invalid roster: {e}")))?,
            None => Vec::new(),
        };
        if !stored.is_empty() {
            return Ok(stored);
        }

        let seeded = vec![Persona::default_companion()];
        tracing::info!(persona = %seeded[0].name, "seeding default persona");
        self.save(&seeded).await?;
        Ok(seeded)
    }

    /// Look a persona up by id or exact name.
    pub async fn find(&self, needle: &str) -> Result<Persona, PersonaError> {
        let personas = self.list().await?;
        position_of(&personas, needle)
            .map(|index| personas[index].clone())
            .ok_or_else(|| PersonaError::NotFound(needle.to_string()))
    }

    /// Add a persona and make it active.
    pub async fn create(&self, request: CreatePersonaRequest) -> Result<Persona, PersonaError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PersonaError::InvalidName("请输入角色名称".to_string()));
        }

        let mut persona = Persona::new(name, request.personality.trim());
        if let Some(avatar) = request.avatar.filter(|a| !a.trim().is_empty()) {
            persona.avatar = avatar;
        }
        persona.emotions.extend(request.emotions);

        let mut personas = self.list().await?;
        personas.push(persona.clone());
        self.save(&personas).await?;
        self.set_active(&persona.id).await?;

        tracing::info!(persona = %persona.name, id = %persona.id, "persona created");
        Ok(persona)
    }

    /// The active persona. Falls back to the first one when the stored
    /// selection is missing or stale.
    pub async fn active(&self) -> Result<Persona, PersonaError> {
        let personas = self.list().await?;
        let selected = self
            .kv
            .get(KEY_ACTIVE_CHARACTER)
            .await?
            .and_then(|value| value.as_str().map(str::to_string));

        let active = selected
            .and_then(|id| position_of(&personas, &id))
            .map(|index| personas[index].clone());
        match active {
            Some(persona) => Ok(persona),
            None => Ok(personas[0].clone()),
        }
    }

    /// Make the persona matching `needle` active.
    pub async fn activate(&self, needle: &str) -> Result<Persona, PersonaError> {
        let persona = self.find(needle).await?;
        self.set_active(&persona.id).await?;
        Ok(persona)
    }

    /// Remove a persona and return the persona active afterwards.
    pub async fn delete(&self, needle: &str) -> Result<Persona, PersonaError> {
        let mut personas = self.list().await?;
        if personas.len() <= 1 {
            return Err(PersonaError::LastPersona);
        }
        let index =
            position_of(&personas, needle).ok_or_else(|| PersonaError::NotFound(needle.to_string()))?;

        let active_before = self.active().await?;
        let removed = personas.remove(index);
        self.save(&personas).await?;

        let active = if active_before.id == removed.id {
            let first = personas[0].clone();
            self.set_active(&first.id).await?;
            first
        } else {
            active_before
        };

        tracing::info!(persona = %removed.name, "persona deleted");
        Ok(active)
    }

    /// Point one emotion of a persona at a custom image.
    pub async fn set_emotion_asset(
        &self,
        needle: &str,
        emotion: EmotionLabel,
        asset: &str,
    ) -> Result<Persona, PersonaError> {
        let mut personas = self.list().await?;
        let index =
            position_of(&personas, needle).ok_or_else(|| PersonaError::NotFound(needle.to_string()))?;
        personas[index].emotions.insert(emotion, asset.to_string());
        self.save(&personas).await?;
        Ok(personas[index].clone())
    }

    async fn save(&self, personas: &[Persona]) -> Result<(), PersonaError> {
        let value = serde_json::to_value(personas)
            .map_err(|e| PersonaError::StorageError(format!("failed to serialize roster: {e}")))?;
        self.kv.set(KEY_CHARACTERS, &value).await?;
        Ok(())
    }

    async fn set_active(&self, id: &PersonaId) -> Result<(), PersonaError> {
        self.kv
            .set(KEY_ACTIVE_CHARACTER, &serde_json::Value::String(id.to_string()))
            .await?;
        Ok(())
    }
}

fn position_of(personas: &[Persona], needle: &str) -> Option<usize> {
    let needle = needle.trim();
    personas
        .iter()
        .position(|p| p.id.to_string() == needle)
        .or_else(|| personas.iter().position(|p| p.name == needle))
}
