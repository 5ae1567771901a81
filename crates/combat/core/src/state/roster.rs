use super::{Character, CharacterId, RosterError, Side};

/// Every character taking part in one encounter, in registration order.
///
/// Characters are never removed: a character's id is its position in the
/// roster for the lifetime of the encounter, so aggro tables, UI bindings and
/// queued events can keep referring to it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a character and returns its id.
    ///
    /// Ids are sequential from 0. Every spell of the character starts ready to cast.
    pub fn register(&mut self, mut character: Character) -> Result<CharacterId, RosterError> {
        let registered = self.characters.len();
        let id = u32::try_from(registered)
            .map(CharacterId)
            .map_err(|_| RosterError::IdOverflow { registered })?;

        character.id = id;
        character.ready_spells();
        self.characters.push(character);

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        id.index() < self.characters.len()
    }

    pub fn get(&self, id: CharacterId) -> Result<&Character, RosterError> {
        let len = self.characters.len();
        self.characters
            .get(id.index())
            .ok_or(RosterError::UnknownCharacter { id, len })
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Result<&mut Character, RosterError> {
        let len = self.characters.len();
        self.characters
            .get_mut(id.index())
            .ok_or(RosterError::UnknownCharacter { id, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    pub fn as_slice(&self) -> &[Character] {
        &self.characters
    }

    /// Living characters of `side`.
    pub fn living(&self, side: Side) -> impl Iterator<Item = &Character> {
        self.characters
            .iter()
            .filter(move |c| c.side == side && c.is_alive())
    }

    /// Drops every character. Ids start again from 0 afterwards.
    pub fn clear(&mut self) {
        self.characters.clear();
    }
}
