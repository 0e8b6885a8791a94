//! In-memory battlefield with flat tile storage.

use battlescape_core::{
    Battlefield, Mover, PartData, Position, PreviewSurface, Tile, TilePart, UnitId, Volume,
};

use crate::error::PlacementError;
use crate::soldier::Soldier;

/// A battlefield of `width × length × height` tiles stored level-major in a
/// single `Vec`, addressed through [`Volume::index`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMap {
    volume: Volume,
    tiles: Vec<Tile>,
}

impl BattleMap {
    /// A map of empty tiles (no floors, no walls).
    pub fn new(volume: Volume) -> Self {
        Self {
            volume,
            tiles: vec![Tile::new(); volume.len()],
        }
    }

    /// A map whose ground level is floored with `floor` everywhere.
    pub fn with_ground(volume: Volume, floor: PartData) -> Self {
        let mut map = Self::new(volume);
        for x in 0..volume.width() {
            for y in 0..volume.length() {
                if let Some(t) = map.tile_mut(Position::new(x, y, 0)) {
                    t.set_part(TilePart::Floor, Some(floor));
                }
            }
        }
        map
    }

    /// Replace the tile at `pos`. Returns `false` outside the map.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> bool {
        match self.tile_mut(pos) {
            Some(t) => {
                *t = tile;
                true
            }
            None => false,
        }
    }

    /// Put `unit` on the map, writing its occupant record to every tile of
    /// its footprint. Nothing is written if any tile is unavailable.
    pub fn place(&mut self, unit: &Soldier) -> Result<(), PlacementError> {
        let anchor = unit.position();
        for off in unit.footprint().offsets() {
            let pos = anchor + off;
            let tile = self.tile(pos).ok_or(PlacementError::OutOfBounds(pos))?;
            match tile.occupant {
                Some(occ) if occ.id != unit.id => {
                    return Err(PlacementError::Occupied { pos, by: occ.id });
                }
                _ => {}
            }
        }
        let occupant = unit.occupant();
        for off in unit.footprint().offsets() {
            if let Some(t) = self.tile_mut(anchor + off) {
                t.occupant = Some(occupant);
            }
        }
        Ok(())
    }

    /// Clear every occupant record belonging to `id`. Returns how many tiles
    /// were cleared.
    pub fn remove_unit(&mut self, id: UnitId) -> usize {
        let mut n = 0;
        for t in &mut self.tiles {
            if t.occupant.is_some_and(|o| o.id == id) {
                t.occupant = None;
                n += 1;
            }
        }
        n
    }

    /// Positions currently carrying a path preview marker.
    pub fn marked(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.marker.is_some())
            .map(|(i, _)| self.volume.position(i))
    }
}

impl Battlefield for BattleMap {
    #[inline]
    fn volume(&self) -> Volume {
        self.volume
    }

    #[inline]
    fn tile(&self, pos: Position) -> Option<&Tile> {
        self.volume.index(pos).and_then(|i| self.tiles.get(i))
    }
}

impl PreviewSurface for BattleMap {
    #[inline]
    fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.volume.index(pos).and_then(|i| self.tiles.get_mut(i))
    }
}
