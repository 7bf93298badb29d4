use serde::{Deserialize, Deserializer, Serialize};

use crate::models::event::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    pub attacker_id: i64,
    pub defender_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotionInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buff_type: String,
    pub quantity: u32,
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body returned by the combat resolver's `POST /battle`.
///
/// The server serialises unset reference fields as `null`, so lists and names
/// tolerate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub winner_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner_name: String,
    pub loser_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub loser_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub battle_log: Vec<String>,
    pub gold_reward: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attacker_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defender_name: String,
    #[serde(default)]
    pub attacker_avatar: Option<String>,
    #[serde(default)]
    pub defender_avatar: Option<String>,
    #[serde(default)]
    pub attacker_class: Option<String>,
    #[serde(default)]
    pub defender_class: Option<String>,
    pub attacker_max_hp: u32,
    pub defender_max_hp: u32,
    #[serde(default)]
    pub attacker_final_hp: Option<u32>,
    #[serde(default)]
    pub defender_final_hp: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attacker_potions: Vec<PotionInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defender_potions: Vec<PotionInfo>,
}

/// A request/response pair saved to disk so a fight can be replayed offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    pub attacker_id: i64,
    pub defender_id: i64,
    pub response: BattleResponse,
}

impl BattleRecord {
    pub fn request(&self) -> BattleRequest {
        BattleRequest {
            attacker_id: self.attacker_id,
            defender_id: self.defender_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantInfo {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
    pub class: Option<String>,
    pub max_hp: u32,
    pub potions: Vec<PotionInfo>,
}

/// The resolved fight, immutable for the lifetime of one playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleResult {
    pub attacker: CombatantInfo,
    pub defender: CombatantInfo,
    pub log: Vec<String>,
    pub winner_id: i64,
    pub winner_name: String,
    pub gold_reward: i64,
}

impl BattleResult {
    /// Combatant ids are not echoed by the resolver, so they come from the request.
    pub fn from_response(request: BattleRequest, response: BattleResponse) -> Self {
        Self {
            attacker: CombatantInfo {
                id: request.attacker_id,
                name: response.attacker_name,
                avatar: response.attacker_avatar,
                class: response.attacker_class,
                max_hp: response.attacker_max_hp,
                potions: response.attacker_potions,
            },
            defender: CombatantInfo {
                id: request.defender_id,
                name: response.defender_name,
                avatar: response.defender_avatar,
                class: response.defender_class,
                max_hp: response.defender_max_hp,
                potions: response.defender_potions,
            },
            log: response.battle_log,
            winner_id: response.winner_id,
            winner_name: response.winner_name,
            gold_reward: response.gold_reward,
        }
    }

    pub fn combatant(&self, side: Side) -> &CombatantInfo {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    /// `None` when the winner id matches neither combatant.
    pub fn winner_side(&self) -> Option<Side> {
        if self.winner_id == self.attacker.id {
            Some(Side::Attacker)
        } else if self.winner_id == self.defender.id {
            Some(Side::Defender)
        } else {
            None
        }
    }
}
