//! Read-only view of the motion queue shared with the step generation layer.
//!
//! - `Move`: one queued motion segment with a quadratic (constant
//!   acceleration) position profile over a fixed duration.
//! - `MoveQueue`: append-only arena of segments in schedule order.
//! - `MoveCursor`: bounds-checked navigation over the arena. Kinematics
//!   implementations that integrate across segment boundaries walk with
//!   `prev`/`next` and must handle `None` at either end of the queue.

/// One queued motion segment.
///
/// The position along the move axis is
/// `start_pos + t * (start_v + t * half_accel)` for `t` in `[0, move_t]`,
/// i.e. `half_accel` is one half of the constant acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Move {
    /// Global schedule timestamp at which this move begins.
    pub print_time: f64,
    /// Duration of the move in seconds.
    pub move_t: f64,
    /// Axis position at `t = 0`.
    pub start_pos: f64,
    /// Axis velocity at `t = 0`.
    pub start_v: f64,
    /// Half of the constant acceleration over the move.
    pub half_accel: f64,
    /// Whether this move carries an extrusion component. Moves with this
    /// flag cleared (travel moves, z hops) contribute zero extrusion
    /// velocity to any smoothing window that overlaps them.
    pub extrudes: bool,
}

impl Move {
    /// Distance traveled `move_time` seconds into the move.
    #[inline]
    pub fn distance_at(&self, move_time: f64) -> f64 {
        (self.start_v + self.half_accel * move_time) * move_time
    }

    /// Instantaneous velocity `move_time` seconds into the move.
    #[inline]
    pub fn velocity_at(&self, move_time: f64) -> f64 {
        self.start_v + 2.0 * self.half_accel * move_time
    }

    /// Global schedule timestamp at which this move ends.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.print_time + self.move_t
    }
}

/// Append-only arena of moves in schedule order.
///
/// Owned by the motion planner; kinematics code only ever holds a
/// `MoveCursor` into it. Indices are stable (no removal from the middle).
#[derive(Debug, Default)]
pub struct MoveQueue {
    moves: Vec<Move>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a move. Moves must be pushed in schedule order; a move that
    /// starts before its predecessor is a planner bug.
    pub fn push(&mut self, m: Move) {
        debug_assert!(
            self.moves
                .last()
                .is_none_or(|prev| m.print_time >= prev.print_time),
            "moves must be appended in schedule order"
        );
        self.moves.push(m);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Cursor positioned on the move at `index`, if it exists.
    pub fn cursor(&self, index: usize) -> Option<MoveCursor<'_>> {
        (index < self.moves.len()).then_some(MoveCursor { queue: self, index })
    }

    /// Cursor positioned on the move whose time span contains `print_time`.
    ///
    /// Boundary instants resolve to the later move; a time past the last
    /// move's end resolves to the last move.
    pub fn cursor_at(&self, print_time: f64) -> Option<MoveCursor<'_>> {
        let index = self
            .moves
            .iter()
            .rposition(|m| m.print_time <= print_time)?;
        Some(MoveCursor { queue: self, index })
    }
}

/// Bounds-checked read-only position within a `MoveQueue`.
#[derive(Clone, Copy, Debug)]
pub struct MoveCursor<'q> {
    queue: &'q MoveQueue,
    index: usize,
}

impl<'q> MoveCursor<'q> {
    /// The move under the cursor.
    #[inline]
    pub fn get(&self) -> &'q Move {
        &self.queue.moves[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cursor on the previous move in schedule order, if any.
    #[inline]
    pub fn prev(&self) -> Option<MoveCursor<'q>> {
        self.index.checked_sub(1).map(|index| MoveCursor {
            queue: self.queue,
            index,
        })
    }

    /// Cursor on the next move in schedule order, if any.
    #[inline]
    pub fn next(&self) -> Option<MoveCursor<'q>> {
        self.queue.cursor(self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(print_time: f64, move_t: f64) -> Move {
        Move {
            print_time,
            move_t,
            start_pos: 0.0,
            start_v: 1.0,
            half_accel: 0.0,
            extrudes: true,
        }
    }

    #[test]
    fn cursor_navigation_stops_at_bounds() {
        let mut q = MoveQueue::new();
        q.push(seg(0.0, 1.0));
        q.push(seg(1.0, 1.0));
        q.push(seg(2.0, 1.0));

        let c = q.cursor(1).unwrap();
        assert_eq!(c.prev().unwrap().index(), 0);
        assert_eq!(c.next().unwrap().index(), 2);
        assert!(c.prev().unwrap().prev().is_none());
        assert!(c.next().unwrap().next().is_none());
        assert!(q.cursor(3).is_none());
    }

    #[test]
    fn cursor_at_resolves_boundaries_to_later_move() {
        let mut q = MoveQueue::new();
        q.push(seg(0.0, 1.0));
        q.push(seg(1.0, 1.0));

        assert_eq!(q.cursor_at(0.5).unwrap().index(), 0);
        assert_eq!(q.cursor_at(1.0).unwrap().index(), 1);
        assert_eq!(q.cursor_at(5.0).unwrap().index(), 1);
        assert!(q.cursor_at(-0.1).is_none());
    }

    #[test]
    fn move_profile_evaluation() {
        let m = Move {
            print_time: 2.0,
            move_t: 1.0,
            start_pos: 10.0,
            start_v: 3.0,
            half_accel: 0.5,
            extrudes: true,
        };
        // p(t) = 3t + 0.5 t^2, v(t) = 3 + t
        assert_eq!(m.distance_at(0.0), 0.0);
        assert!((m.distance_at(1.0) - 3.5).abs() < 1e-12);
        assert!((m.velocity_at(1.0) - 4.0).abs() < 1e-12);
        assert!((m.end_time() - 3.0).abs() < 1e-12);
    }
}
