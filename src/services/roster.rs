use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Player, PlayerId, PlayerRequest};

/// Errors that can occur when working with the roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Player not found: {0}")]
    NotFound(PlayerId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug)]
struct RosterTable {
    next_id: PlayerId,
    players: BTreeMap<PlayerId, Player>,
}

/// In-memory roster of club players
///
/// Readers get cloned snapshots, so a match generation run never observes a
/// roster edit made while it is running.
#[derive(Debug)]
pub struct RosterStore {
    table: RwLock<RosterTable>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(RosterTable {
                next_id: 1,
                players: BTreeMap::new(),
            }),
        }
    }

    /// Build a store from existing records, keeping their ids
    pub fn from_players(players: Vec<Player>) -> Result<Self, RosterError> {
        let mut table = BTreeMap::new();
        for player in players {
            let id = player.id;
            if table.insert(id, player).is_some() {
                return Err(RosterError::InvalidInput(format!("duplicate player id {}", id)));
            }
        }

        let next_id = table.keys().next_back().map_or(1, |id| id + 1);

        Ok(Self {
            table: RwLock::new(RosterTable {
                next_id,
                players: table,
            }),
        })
    }

    /// Seed a store from a JSON array of players
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let players: Vec<Player> = serde_json::from_str(&raw)?;

        tracing::info!(
            "Loaded {} players from {}",
            players.len(),
            path.as_ref().display()
        );

        Self::from_players(players)
    }

    /// Snapshot of players participating in the session, in id order
    pub async fn eligible_players(&self) -> Vec<Player> {
        let table = self.table.read().await;
        table
            .players
            .values()
            .filter(|player| player.participating)
            .cloned()
            .collect()
    }

    /// Full roster ordered by grade, gender, then level
    pub async fn list(&self) -> Vec<Player> {
        let table = self.table.read().await;
        let mut players: Vec<Player> = table.players.values().cloned().collect();
        players.sort_by(|a, b| {
            a.grade
                .cmp(&b.grade)
                .then_with(|| a.gender.as_str().cmp(b.gender.as_str()))
                .then_with(|| a.level.cmp(&b.level))
        });
        players
    }

    pub async fn get(&self, id: PlayerId) -> Result<Player, RosterError> {
        let table = self.table.read().await;
        table.players.get(&id).cloned().ok_or(RosterError::NotFound(id))
    }

    pub async fn add(&self, request: PlayerRequest) -> Player {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let player = Player {
            id,
            name: request.name,
            gender: request.gender,
            grade: request.grade,
            level: request.level,
            participating: request.participating,
        };
        table.players.insert(id, player.clone());

        tracing::debug!("Added player {} ({})", id, player.name);
        player
    }

    pub async fn update(&self, id: PlayerId, request: PlayerRequest) -> Result<Player, RosterError> {
        let mut table = self.table.write().await;
        let player = table.players.get_mut(&id).ok_or(RosterError::NotFound(id))?;

        player.name = request.name;
        player.gender = request.gender;
        player.grade = request.grade;
        player.level = request.level;
        player.participating = request.participating;

        Ok(player.clone())
    }

    pub async fn remove(&self, id: PlayerId) -> Result<Player, RosterError> {
        let mut table = self.table.write().await;
        let player = table.players.remove(&id).ok_or(RosterError::NotFound(id))?;
        tracing::debug!("Removed player {} ({})", id, player.name);
        Ok(player)
    }

    /// Flip a player's participation flag and return the updated record
    pub async fn toggle_participation(&self, id: PlayerId) -> Result<Player, RosterError> {
        let mut table = self.table.write().await;
        let player = table.players.get_mut(&id).ok_or(RosterError::NotFound(id))?;
        player.participating = !player.participating;
        Ok(player.clone())
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.players.len()
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}
