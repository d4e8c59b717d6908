//! Platform input mapping
//!
//! Real event sources (browser keyboard, terminal, window system) live
//! outside the crate; they hand key names in and forward the mapped
//! direction to `Session::handle_input` on both press and release.

use crate::sim::Direction;

/// Map a keyboard key name to a logical direction. Arrows and their WASD
/// duplicates are the whole input surface; anything else is ignored.
pub fn key_to_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_map_alike() {
        assert_eq!(key_to_direction("ArrowLeft"), Some(Direction::Left));
        assert_eq!(key_to_direction("a"), Some(Direction::Left));
        assert_eq!(key_to_direction("ArrowRight"), Some(Direction::Right));
        assert_eq!(key_to_direction("D"), Some(Direction::Right));
        assert_eq!(key_to_direction("ArrowUp"), Some(Direction::Up));
        assert_eq!(key_to_direction("w"), Some(Direction::Up));
        assert_eq!(key_to_direction("ArrowDown"), Some(Direction::Down));
        assert_eq!(key_to_direction("S"), Some(Direction::Down));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert_eq!(key_to_direction("Space"), None);
        assert_eq!(key_to_direction("q"), None);
        assert_eq!(key_to_direction(""), None);
    }
}
