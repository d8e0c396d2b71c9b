use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::Error;

/// Dense index of a room inside a [`Graph`], assigned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomId(usize);

impl RoomId {
    /// Position of the room in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A room declared in the farm description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub x: i64,
    pub y: i64,
}

/// Room graph used by the path finder and the scheduler.
///
/// Rooms live in an arena indexed by [`RoomId`]; adjacency is kept in a
/// separate list keyed by the same id, in tunnel declaration order.
#[derive(Debug, Clone)]
pub struct Graph {
    rooms: Vec<Room>,
    name_to_id: HashMap<String, RoomId>,
    adjacency: Vec<Vec<RoomId>>,
    start: RoomId,
    end: RoomId,
}

impl Graph {
    /// Start an empty [`GraphBuilder`].
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn start(&self) -> RoomId {
        self.start
    }

    pub fn end(&self) -> RoomId {
        self.end
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of distinct tunnels.
    pub fn tunnel_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn room_name(&self, id: RoomId) -> &str {
        &self.rooms[id.0].name
    }

    /// Lookup a room identifier by its case-sensitive name.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.name_to_id.get(name).copied()
    }

    /// Return the neighbours of a room in tunnel declaration order.
    pub fn neighbours(&self, room: RoomId) -> &[RoomId] {
        self.adjacency.get(room.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, room: RoomId) -> usize {
        self.neighbours(room).len()
    }
}

/// Conflicts detected while assembling a [`Graph`].
///
/// These carry no source position; the loader attaches one through
/// [`GraphConflict::at_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphConflict {
    DuplicateName {
        name: String,
    },
    DuplicateCoordinates {
        name: String,
        existing: String,
        x: i64,
        y: i64,
    },
    UnknownRoom {
        name: String,
    },
    SelfTunnel {
        name: String,
    },
    MissingStart,
    MissingEnd,
    StartIsEnd {
        name: String,
    },
}

impl GraphConflict {
    /// Convert into a library [`Error`] reported against `line`.
    pub fn at_line(self, line: usize) -> Error {
        match self {
            GraphConflict::DuplicateName { name } => Error::DuplicateRoom { line, name },
            GraphConflict::DuplicateCoordinates {
                name,
                existing,
                x,
                y,
            } => Error::DuplicateCoordinates {
                line,
                name,
                existing,
                x,
                y,
            },
            GraphConflict::UnknownRoom { name } => Error::UnknownRoom { line, name },
            GraphConflict::SelfTunnel { name } => Error::SelfTunnel { line, name },
            GraphConflict::MissingStart => Error::MissingStart,
            GraphConflict::MissingEnd => Error::MissingEnd,
            GraphConflict::StartIsEnd { name } => Error::StartIsEnd { name },
        }
    }
}

impl fmt::Display for GraphConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the error wording without a line prefix.
        let message = self.clone().at_line(0).to_string();
        f.write_str(message.trim_start_matches("line 0: "))
    }
}

impl std::error::Error for GraphConflict {}

/// Incremental, validating constructor for [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    rooms: Vec<Room>,
    name_to_id: HashMap<String, RoomId>,
    coordinates: HashMap<(i64, i64), RoomId>,
    adjacency: Vec<Vec<RoomId>>,
    start: Option<RoomId>,
    end: Option<RoomId>,
}

impl GraphBuilder {
    /// Declare a room. Names and coordinates must be unique.
    pub fn add_room(
        &mut self,
        name: &str,
        x: i64,
        y: i64,
    ) -> std::result::Result<RoomId, GraphConflict> {
        if self.name_to_id.contains_key(name) {
            return Err(GraphConflict::DuplicateName {
                name: name.to_string(),
            });
        }
        if let Some(existing) = self.coordinates.get(&(x, y)) {
            return Err(GraphConflict::DuplicateCoordinates {
                name: name.to_string(),
                existing: self.rooms[existing.0].name.clone(),
                x,
                y,
            });
        }

        let id = RoomId(self.rooms.len());
        self.rooms.push(Room {
            name: name.to_string(),
            x,
            y,
        });
        self.name_to_id.insert(name.to_string(), id);
        self.coordinates.insert((x, y), id);
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Declare a tunnel between two existing rooms.
    ///
    /// Returns `false` when the tunnel was already declared; repeated tunnels
    /// do not add capacity.
    pub fn add_tunnel(&mut self, a: &str, b: &str) -> std::result::Result<bool, GraphConflict> {
        let a_id = self.lookup(a)?;
        let b_id = self.lookup(b)?;
        if a_id == b_id {
            return Err(GraphConflict::SelfTunnel {
                name: a.to_string(),
            });
        }
        if self.adjacency[a_id.0].contains(&b_id) {
            return Ok(false);
        }
        self.adjacency[a_id.0].push(b_id);
        self.adjacency[b_id.0].push(a_id);
        Ok(true)
    }

    pub fn set_start(&mut self, room: RoomId) -> &mut Self {
        self.start = Some(room);
        self
    }

    pub fn set_end(&mut self, room: RoomId) -> &mut Self {
        self.end = Some(room);
        self
    }

    /// Lookup a previously declared room.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.name_to_id.get(name).copied()
    }

    /// Finish the graph, checking that start and end are set and distinct.
    pub fn build(self) -> std::result::Result<Graph, GraphConflict> {
        let start = self.start.ok_or(GraphConflict::MissingStart)?;
        let end = self.end.ok_or(GraphConflict::MissingEnd)?;
        if start == end {
            return Err(GraphConflict::StartIsEnd {
                name: self.rooms[start.0].name.clone(),
            });
        }

        Ok(Graph {
            rooms: self.rooms,
            name_to_id: self.name_to_id,
            adjacency: self.adjacency,
            start,
            end,
        })
    }

    fn lookup(&self, name: &str) -> std::result::Result<RoomId, GraphConflict> {
        self.room_id(name).ok_or_else(|| GraphConflict::UnknownRoom {
            name: name.to_string(),
        })
    }
}

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity bitset over room identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSet {
    words: Vec<u64>,
}

impl RoomSet {
    /// Create an empty set able to hold every room of `graph`.
    pub fn for_graph(graph: &Graph) -> Self {
        Self::with_capacity(graph.room_count())
    }

    pub fn with_capacity(rooms: usize) -> Self {
        Self {
            words: vec![0; rooms.div_ceil(WORD_BITS)],
        }
    }

    /// Insert a room, returning `true` if it was not yet present.
    pub fn insert(&mut self, room: RoomId) -> bool {
        let (word, mask) = Self::slot(room);
        let present = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !present
    }

    pub fn contains(&self, room: RoomId) -> bool {
        let (word, mask) = Self::slot(room);
        self.words
            .get(word)
            .map(|bits| bits & mask != 0)
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
    }

    pub fn len(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    fn slot(room: RoomId) -> (usize, u64) {
        (room.0 / WORD_BITS, 1u64 << (room.0 % WORD_BITS))
    }
}

impl Extend<RoomId> for RoomSet {
    fn extend<T: IntoIterator<Item = RoomId>>(&mut self, iter: T) {
        for room in iter {
            self.insert(room);
        }
    }
}
