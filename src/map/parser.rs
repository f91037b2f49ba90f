//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::{MapTile, BOARD_CELL_SIZE};
use crate::error::ParseError;
use glam::IVec2;

/// Number of ghost start markers (`0`-`3`) a board must contain.
const GHOST_COUNT: usize = 4;

/// Represents the parsed data from a raw board layout.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    /// The parsed tile layout, indexed `[x][y]`.
    pub tiles: [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize],
    /// The positions of the house door tiles.
    pub house_door: [IVec2; 2],
    /// Pac-Man's starting position.
    pub pacman_start: IVec2,
    /// The ghost starting positions, in ghost ID order.
    pub ghost_starts: [IVec2; GHOST_COUNT],
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Start markers (`X` and `0`-`3`) are empty tiles; their positions are tracked by
    /// [`MapTileParser::parse_board`].
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' => Ok(MapTile::Empty),
            'T' => Ok(MapTile::Tunnel),
            '=' => Ok(MapTile::Door),
            'X' | '0'..='3' => Ok(MapTile::Empty),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board contains unknown characters, if the house door
    /// is not defined by exactly two '=' characters, or if a start marker is missing.
    pub fn parse_board(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> Result<ParsedMap, ParseError> {
        let mut tiles = [[MapTile::Empty; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize];
        let mut house_door: Vec<IVec2> = Vec::with_capacity(2);
        let mut pacman_start: Option<IVec2> = None;
        let mut ghost_starts: [Option<IVec2>; GHOST_COUNT] = [None; GHOST_COUNT];

        for (y, line) in raw_board.iter().enumerate().take(BOARD_CELL_SIZE.y as usize) {
            for (x, character) in line.chars().enumerate().take(BOARD_CELL_SIZE.x as usize) {
                let tile = Self::parse_character(character)?;
                let position = IVec2::new(x as i32, y as i32);

                match character {
                    '=' => house_door.push(position),
                    'X' => pacman_start = Some(position),
                    '0'..='3' => {
                        let index = character as usize - '0' as usize;
                        ghost_starts[index] = Some(position);
                    }
                    _ => {}
                }

                tiles[x][y] = tile;
            }
        }

        if house_door.len() != 2 {
            return Err(ParseError::InvalidHouseDoorCount(house_door.len()));
        }

        let pacman_start = pacman_start.ok_or(ParseError::MissingStart("Pac-Man"))?;
        let names = ["the red ghost", "the pink ghost", "the cyan ghost", "the orange ghost"];
        let mut starts = [IVec2::ZERO; GHOST_COUNT];
        for (index, start) in ghost_starts.iter().enumerate() {
            starts[index] = start.ok_or(ParseError::MissingStart(names[index]))?;
        }

        Ok(ParsedMap {
            tiles,
            house_door: [house_door[0], house_door[1]],
            pacman_start,
            ghost_starts: starts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    #[test]
    fn test_parse_character() {
        assert!(matches!(MapTileParser::parse_character('#').unwrap(), MapTile::Wall));
        assert!(matches!(MapTileParser::parse_character('.').unwrap(), MapTile::Pellet));
        assert!(matches!(MapTileParser::parse_character('o').unwrap(), MapTile::PowerPellet));
        assert!(matches!(MapTileParser::parse_character(' ').unwrap(), MapTile::Empty));
        assert!(matches!(MapTileParser::parse_character('T').unwrap(), MapTile::Tunnel));
        assert!(matches!(MapTileParser::parse_character('X').unwrap(), MapTile::Empty));
        assert!(matches!(MapTileParser::parse_character('2').unwrap(), MapTile::Empty));
        assert!(matches!(MapTileParser::parse_character('=').unwrap(), MapTile::Door));

        assert!(MapTileParser::parse_character('Z').is_err());
    }

    #[test]
    fn test_parse_board_missing_ghost() {
        let mut board = RAW_BOARD;
        board[14] = "TTTTTT.   #2 1   #   .TTTTTT";

        let result = MapTileParser::parse_board(board);
        assert!(matches!(result.unwrap_err(), ParseError::MissingStart("the orange ghost")));
    }
}
