use std::fmt::Display;

use crate::backgammon::{BoardError, Checker, Color, Point};

pub const POINTS: usize = 24;

pub const CHECKERS_PER_COLOR: u8 = 15;

/// The 24 points and the two bars.
///
/// Each point is stored as a signed count: positive values are White
/// checkers, negative values Black. The board only refuses operations that
/// are structurally impossible. Whether a move is legal is decided by
/// [`crate::backgammon::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    points: [i8; POINTS],
    bar: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Creates a new board with the default starting position.
    pub fn new() -> Self {
        Board {
            // idx:  0  1  2  3  4  5  6  7  8  9 10 11  12 13 14 15 16 17 18 19 20 21 22 23
            points: [-2, 0, 0, 0, 0, -5, 0, -3, 0, 0, 0, 5, -5, 0, 0, 0, 3, 0, 5, 0, 0, 0, 0, 2],
            bar: [0, 0],
        }
    }

    /// Creates an empty board with no checkers on it.
    pub fn empty() -> Self {
        Board {
            points: [0; POINTS],
            bar: [0, 0],
        }
    }

    fn check_index(index: usize) -> Result<usize, BoardError> {
        if index < POINTS {
            Ok(index)
        } else {
            Err(BoardError::OutOfRange(index))
        }
    }

    pub fn point_at(&self, index: usize) -> Result<Point, BoardError> {
        let index = Self::check_index(index)?;
        Ok(Point::from_signed(self.points[index]))
    }

    /// Set an arbitrary number of checkers on a position.
    /// Positive values for White, negative values for Black.
    pub fn set_checkers_on_position(&mut self, index: usize, value: i8) -> Result<(), BoardError> {
        let index = Self::check_index(index)?;
        self.points[index] = value;
        Ok(())
    }

    pub fn set_bar(&mut self, color: Color, count: u8) {
        self.bar[color.index()] = count;
    }

    pub fn points(&self) -> [Point; POINTS] {
        self.points.map(Point::from_signed)
    }

    /// The checkers on a point as a stack, bottom first.
    pub fn point_stack(&self, index: usize) -> Result<Vec<Checker>, BoardError> {
        Ok(self.point_at(index)?.checkers())
    }

    /// Pushes one checker of `color` onto a point.
    /// Fails if the point holds checkers of the other color.
    pub fn add_checker(&mut self, color: Color, index: usize) -> Result<(), BoardError> {
        let index = Self::check_index(index)?;
        let point = Point::from_signed(self.points[index]);
        match point.color {
            Some(owner) if owner != color => Err(BoardError::Occupied { index, color: owner }),
            _ => {
                self.points[index] += color.sign();
                Ok(())
            }
        }
    }

    /// Pops the top checker of a point and returns its color.
    pub fn remove_checker(&mut self, index: usize) -> Result<Color, BoardError> {
        let index = Self::check_index(index)?;
        let color = Point::from_signed(self.points[index])
            .color
            .ok_or(BoardError::EmptyPoint(index))?;
        self.points[index] -= color.sign();
        Ok(color)
    }

    pub fn send_to_bar(&mut self, color: Color) {
        self.bar[color.index()] += 1;
    }

    pub fn remove_from_bar(&mut self, color: Color) -> Result<(), BoardError> {
        match self.bar[color.index()] {
            0 => Err(BoardError::EmptyBar(color)),
            _ => {
                self.bar[color.index()] -= 1;
                Ok(())
            }
        }
    }

    pub fn count_at_bar(&self, color: Color) -> u8 {
        self.bar[color.index()]
    }

    /// Indices of the points holding at least one checker of `color`, ascending.
    pub fn points_occupied_by(&self, color: Color) -> Vec<usize> {
        (0..POINTS)
            .filter(|&i| Point::from_signed(self.points[i]).is_owned_by(color))
            .collect()
    }

    /// Checkers of `color` on the 24 points, bar excluded.
    ///
    /// Counted in `u32`: a hand-built board may hold far more than 15.
    pub fn checkers_on_board(&self, color: Color) -> u32 {
        self.checkers_in(color, 0..=POINTS - 1)
    }

    /// Checkers of `color` still in play, on the points or on the bar.
    pub fn checkers_in_play(&self, color: Color) -> u32 {
        self.checkers_on_board(color) + u32::from(self.count_at_bar(color))
    }

    /// Checkers of `color` sitting in the given index range.
    pub fn checkers_in(&self, color: Color, range: std::ops::RangeInclusive<usize>) -> u32 {
        range
            .map(|i| Point::from_signed(self.points[i]))
            .filter(|p| p.is_owned_by(color))
            .map(|p| u32::from(p.count))
            .sum()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = |i: usize| match Point::from_signed(self.points[i]) {
            Point { color: Some(Color::White), count } => format!("{:>2}W", count),
            Point { color: Some(Color::Black), count } => format!("{:>2}B", count),
            _ => "  .".to_string(),
        };
        let row = |range: &mut dyn Iterator<Item = usize>| {
            range.map(&cell).collect::<Vec<_>>().join(" ")
        };

        writeln!(f, " 13  14  15  16  17  18 | BAR |  19  20  21  22  23  24")?;
        writeln!(
            f,
            "{} | W{:>2} | {}",
            row(&mut (12..18)),
            self.bar[Color::White.index()],
            row(&mut (18..24))
        )?;
        writeln!(f, "========================+=====+========================")?;
        writeln!(
            f,
            "{} | B{:>2} | {}",
            row(&mut (6..12).rev()),
            self.bar[Color::Black.index()],
            row(&mut (0..6).rev())
        )?;
        write!(f, " 12  11  10   9   8   7 |     |   6   5   4   3   2   1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let board = Board::new();
        assert_eq!(board.point_at(23), Ok(Point::new(2, Color::White)));
        assert_eq!(board.point_at(11), Ok(Point::new(5, Color::White)));
        assert_eq!(board.point_at(16), Ok(Point::new(3, Color::White)));
        assert_eq!(board.point_at(18), Ok(Point::new(5, Color::White)));
        assert_eq!(board.point_at(0), Ok(Point::new(2, Color::Black)));
        assert_eq!(board.point_at(12), Ok(Point::new(5, Color::Black)));
        assert_eq!(board.point_at(7), Ok(Point::new(3, Color::Black)));
        assert_eq!(board.point_at(5), Ok(Point::new(5, Color::Black)));
        for color in Color::ALL {
            assert_eq!(board.checkers_on_board(color), u32::from(CHECKERS_PER_COLOR));
            assert_eq!(board.count_at_bar(color), 0);
        }
        assert_eq!(board.points_occupied_by(Color::White), vec![11, 16, 18, 23]);
        assert_eq!(board.points_occupied_by(Color::Black), vec![0, 5, 7, 12]);
    }

    #[test]
    fn test_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.point_at(24), Err(BoardError::OutOfRange(24)));
        assert_eq!(board.add_checker(Color::White, 30), Err(BoardError::OutOfRange(30)));
        assert_eq!(board.remove_checker(24), Err(BoardError::OutOfRange(24)));
        assert_eq!(board.point_at(usize::MAX), Err(BoardError::OutOfRange(usize::MAX)));
    }

    #[test]
    fn test_add_and_remove() {
        let mut board = Board::empty();
        board.add_checker(Color::Black, 3).unwrap();
        board.add_checker(Color::Black, 3).unwrap();
        assert_eq!(board.point_at(3), Ok(Point::new(2, Color::Black)));
        assert_eq!(board.point_stack(3).unwrap().len(), 2);
        assert_eq!(board.remove_checker(3), Ok(Color::Black));
        assert_eq!(board.remove_checker(3), Ok(Color::Black));
        assert_eq!(board.remove_checker(3), Err(BoardError::EmptyPoint(3)));
        assert_eq!(board.point_at(3), Ok(Point::EMPTY));
    }

    #[test]
    fn test_add_refuses_mixed_point() {
        let mut board = Board::empty();
        board.add_checker(Color::White, 7).unwrap();
        assert_eq!(
            board.add_checker(Color::Black, 7),
            Err(BoardError::Occupied { index: 7, color: Color::White })
        );
        assert_eq!(board.point_at(7), Ok(Point::new(1, Color::White)));
    }

    #[test]
    fn test_bar() {
        let mut board = Board::empty();
        assert_eq!(board.remove_from_bar(Color::White), Err(BoardError::EmptyBar(Color::White)));
        board.send_to_bar(Color::White);
        board.send_to_bar(Color::White);
        assert_eq!(board.count_at_bar(Color::White), 2);
        assert_eq!(board.count_at_bar(Color::Black), 0);
        board.remove_from_bar(Color::White).unwrap();
        assert_eq!(board.count_at_bar(Color::White), 1);
        assert_eq!(board.checkers_in_play(Color::White), 1);
    }

    #[test]
    fn test_checkers_in_range() {
        let board = Board::new();
        assert_eq!(board.checkers_in(Color::Black, 0..=5), 7);
        assert_eq!(board.checkers_in(Color::White, 18..=23), 7);
    }

    #[test]
    fn test_counts_do_not_overflow() {
        let mut board = Board::empty();
        board.set_checkers_on_position(0, 127).unwrap();
        board.set_checkers_on_position(1, 127).unwrap();
        board.set_checkers_on_position(2, 2).unwrap();
        board.set_checkers_on_position(3, -128).unwrap();
        board.set_bar(Color::White, 250);
        assert_eq!(board.checkers_on_board(Color::White), 256);
        assert_eq!(board.checkers_in_play(Color::White), 506);
        assert_eq!(board.checkers_in_play(Color::Black), 128);
    }

    #[test]
    fn test_display() {
        let text = Board::new().to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains(" 5W"));
        assert!(text.contains(" 2B"));
    }
}
