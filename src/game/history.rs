use super::{castling_rights::CastlingRights, moves::Move, square::Square};

/// Records a committed move along with the informations it destroys, so that it
/// can be taken back exactly.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct HistoryEntry {
    pub played: Move,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}
