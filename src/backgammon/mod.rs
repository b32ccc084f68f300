mod board;
pub use board::Board;
pub use board::CHECKERS_PER_COLOR;
pub use board::POINTS;

mod checker;
pub use checker::Checker;

mod player;
pub use player::Color;
pub use player::Player;

mod point;
pub use point::Point;

mod position;
pub use position::Position;
pub use position::SENTINEL;

mod outcome;
pub use outcome::GameOutcome;

mod game;
pub use game::ColorCounts;
pub use game::Game;
pub use game::GameSnapshot;

mod halfmove;
pub use halfmove::HalfMove;

mod dice;
pub use dice::Dice;

mod error;
pub use error::BoardError;
pub use error::DiceError;
pub use error::GameError;
pub use error::MoveError;
