//! Loader for the line-oriented farm description.
//!
//! The grammar is:
//!
//! ```text
//! 3            # ant count, first significant line
//! ##start
//! start 0 0    # room: name x y
//! ##end
//! end 4 0
//! mid 2 1
//! start-mid    # tunnel: a-b
//! mid-end
//! ```
//!
//! Blank lines and `#` comments are skipped, `##start`/`##end` tag the next
//! room line, and any other `##` command is ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder, RoomId};

const START_MARKER: &str = "##start";
const END_MARKER: &str = "##end";

/// Largest ant count accepted by the loader. Every ant gets a slot in the
/// allocation and the scheduler, so the count bounds memory use.
pub const MAX_ANTS: usize = 10_000_000;

/// A validated farm: the room graph plus the number of ants waiting at start.
#[derive(Debug, Clone)]
pub struct Farm {
    pub ants: usize,
    pub graph: Graph,
}

impl FromStr for Farm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_farm(s)
    }
}

/// Read and parse a farm description from disk.
pub fn load_farm(path: &Path) -> Result<Farm> {
    debug!(path = %path.display(), "loading farm");
    let content = fs::read_to_string(path)?;
    parse_farm(&content)
}

/// Parse a farm description from text.
pub fn parse_farm(input: &str) -> Result<Farm> {
    let mut parser = FarmParser::default();
    for (index, raw) in input.lines().enumerate() {
        parser.feed(index + 1, raw.trim())?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

impl Marker {
    fn label(self) -> &'static str {
        match self {
            Marker::Start => START_MARKER,
            Marker::End => END_MARKER,
        }
    }
}

#[derive(Debug, Default)]
struct FarmParser {
    ants: Option<usize>,
    builder: GraphBuilder,
    pending: Option<(Marker, usize)>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    start_seen: bool,
    end_seen: bool,
    tunnels: usize,
    last_line: usize,
}

impl FarmParser {
    fn feed(&mut self, line: usize, content: &str) -> Result<()> {
        self.last_line = line;
        if content.is_empty() || (content.starts_with('#') && !content.starts_with("##")) {
            return Ok(());
        }

        if self.ants.is_none() {
            self.ants = Some(parse_ant_count(line, content)?);
            return Ok(());
        }

        if content.starts_with("##") {
            return self.command(line, content);
        }

        if content.split_whitespace().count() > 1 {
            return self.room(line, content);
        }

        if content.contains('-') {
            return self.tunnel(line, content);
        }

        Err(Error::UnrecognizedLine {
            line,
            content: content.to_string(),
        })
    }

    fn command(&mut self, line: usize, content: &str) -> Result<()> {
        self.reject_pending()?;

        let marker = match content {
            START_MARKER => Marker::Start,
            END_MARKER => Marker::End,
            other => {
                debug!(line, command = other, "ignoring unknown command");
                return Ok(());
            }
        };

        let seen = match marker {
            Marker::Start => &mut self.start_seen,
            Marker::End => &mut self.end_seen,
        };
        if *seen {
            return Err(Error::DuplicateMarker {
                line,
                marker: marker.label(),
            });
        }
        *seen = true;
        self.pending = Some((marker, line));
        Ok(())
    }

    fn room(&mut self, line: usize, content: &str) -> Result<()> {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [name, x, y] = fields.as_slice() else {
            return Err(Error::InvalidRoomLine {
                line,
                content: content.to_string(),
            });
        };

        if name.starts_with('L') || name.starts_with('#') || name.contains('-') {
            return Err(Error::InvalidRoomName {
                line,
                name: name.to_string(),
            });
        }

        let x = parse_coordinate(line, name, x)?;
        let y = parse_coordinate(line, name, y)?;
        let id = self
            .builder
            .add_room(name, x, y)
            .map_err(|conflict| conflict.at_line(line))?;

        match self.pending.take() {
            Some((Marker::Start, _)) => {
                self.builder.set_start(id);
                self.start = Some(id);
            }
            Some((Marker::End, _)) => {
                self.builder.set_end(id);
                self.end = Some(id);
            }
            None => {}
        }
        Ok(())
    }

    fn tunnel(&mut self, line: usize, content: &str) -> Result<()> {
        self.reject_pending()?;

        let parts: Vec<&str> = content.split('-').collect();
        let [a, b] = parts.as_slice() else {
            return Err(Error::InvalidTunnelLine {
                line,
                content: content.to_string(),
            });
        };
        if a.is_empty() || b.is_empty() {
            return Err(Error::InvalidTunnelLine {
                line,
                content: content.to_string(),
            });
        }

        let added = self
            .builder
            .add_tunnel(a, b)
            .map_err(|conflict| conflict.at_line(line))?;
        if added {
            self.tunnels += 1;
        } else {
            debug!(line, from = *a, to = *b, "ignoring repeated tunnel");
        }
        Ok(())
    }

    fn reject_pending(&mut self) -> Result<()> {
        match self.pending.take() {
            Some((marker, line)) => Err(Error::DanglingMarker {
                line,
                marker: marker.label(),
            }),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<Farm> {
        self.reject_pending()?;
        let ants = self.ants.ok_or(Error::MissingAntCount)?;
        if self.start.is_none() {
            return Err(Error::MissingStart);
        }
        if self.end.is_none() {
            return Err(Error::MissingEnd);
        }

        let graph = self
            .builder
            .build()
            .map_err(|conflict| conflict.at_line(self.last_line))?;
        debug!(
            ants,
            rooms = graph.room_count(),
            tunnels = self.tunnels,
            "parsed farm"
        );
        Ok(Farm { ants, graph })
    }
}

fn parse_ant_count(line: usize, content: &str) -> Result<usize> {
    match content.parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::InvalidAntCount {
            line,
            value: content.to_string(),
        }),
        Ok(count) => usize::try_from(count)
            .ok()
            .filter(|ants| *ants <= MAX_ANTS)
            .ok_or(Error::TooManyAnts {
                line,
                count,
                limit: MAX_ANTS,
            }),
    }
}

fn parse_coordinate(line: usize, room: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| Error::InvalidCoordinate {
        line,
        room: room.to_string(),
        value: value.to_string(),
    })
}
