use thiserror::Error;

/// Convenient result alias for the antfarm library.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The farm description is malformed or contradictory.
    Structural,
    /// The farm is well formed but offers no way from start to end.
    Unsolvable,
    /// A solver invariant was violated.
    Internal,
    /// Reading or writing failed.
    Io,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the input contains no significant lines at all.
    #[error("farm description is empty; expected an ant count on the first line")]
    MissingAntCount,

    /// Raised when the first significant line is not a positive integer.
    #[error("line {line}: invalid number of ants: {value:?}")]
    InvalidAntCount { line: usize, value: String },

    /// Raised when the ant count exceeds what the solver will simulate.
    #[error("line {line}: {count} ants exceeds the limit of {limit}")]
    TooManyAnts {
        line: usize,
        count: u64,
        limit: usize,
    },

    /// Raised when a room line does not have exactly three fields.
    #[error("line {line}: invalid room line: {content:?}")]
    InvalidRoomLine { line: usize, content: String },

    /// Raised when a room coordinate is not an integer.
    #[error("line {line}: invalid coordinate {value:?} for room {room}")]
    InvalidCoordinate {
        line: usize,
        room: String,
        value: String,
    },

    /// Raised when a room name starts with `L` or `#`, or contains `-`.
    #[error("line {line}: invalid room name {name:?}")]
    InvalidRoomName { line: usize, name: String },

    /// Raised when two rooms share a name.
    #[error("line {line}: duplicate room {name}")]
    DuplicateRoom { line: usize, name: String },

    /// Raised when two rooms share coordinates.
    #[error("line {line}: room {name} reuses coordinates ({x}, {y}) of room {existing}")]
    DuplicateCoordinates {
        line: usize,
        name: String,
        existing: String,
        x: i64,
        y: i64,
    },

    /// Raised when a line is neither a comment, a command, a room nor a tunnel.
    #[error("line {line}: unrecognised line: {content:?}")]
    UnrecognizedLine { line: usize, content: String },

    /// Raised when a tunnel line is not of the form `a-b`.
    #[error("line {line}: invalid tunnel line: {content:?}")]
    InvalidTunnelLine { line: usize, content: String },

    /// Raised when a tunnel references an undeclared room.
    #[error("line {line}: tunnel references unknown room {name}")]
    UnknownRoom { line: usize, name: String },

    /// Raised when a tunnel connects a room to itself.
    #[error("line {line}: tunnel connects room {name} to itself")]
    SelfTunnel { line: usize, name: String },

    /// Raised when `##start` or `##end` appears more than once.
    #[error("line {line}: {marker} declared more than once")]
    DuplicateMarker { line: usize, marker: &'static str },

    /// Raised when a `##start`/`##end` marker is not followed by a room line.
    #[error("line {line}: {marker} must be followed by a room line")]
    DanglingMarker { line: usize, marker: &'static str },

    /// Raised when no room was marked as start.
    #[error("missing start room")]
    MissingStart,

    /// Raised when no room was marked as end.
    #[error("missing end room")]
    MissingEnd,

    /// Raised when the same room is marked as both start and end.
    #[error("room {name} is both start and end")]
    StartIsEnd { name: String },

    /// Raised when the start room has no tunnels.
    #[error("start room {start} has no tunnels; no solution exists")]
    StartIsolated { start: String },

    /// Raised when no route from start to end could be found.
    #[error("no route found between {start} and {end}")]
    NoRoute { start: String, end: String },

    /// Raised when ants must be allocated to an empty route set.
    #[error("no routes available to allocate ants to")]
    EmptyRouteSet,

    /// Raised when a turn makes no progress while ants are still travelling.
    #[error("scheduler stalled at turn {turn} with {remaining} ants still travelling")]
    SchedulerStalled { turn: usize, remaining: usize },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::StartIsolated { .. } | Error::NoRoute { .. } | Error::EmptyRouteSet => {
                ErrorKind::Unsolvable
            }
            Error::SchedulerStalled { .. } | Error::Json(_) => ErrorKind::Internal,
            Error::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Structural,
        }
    }

    /// `true` when the input itself is malformed.
    pub fn is_structural(&self) -> bool {
        self.kind() == ErrorKind::Structural
    }

    /// `true` when the input is valid but admits no schedule.
    pub fn is_unsolvable(&self) -> bool {
        self.kind() == ErrorKind::Unsolvable
    }
}
