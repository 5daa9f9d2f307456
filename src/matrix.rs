// Copyright (C) 2020-2026 Andy Kurnia.

// x grows left to right, y grows top to bottom, both from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    #[inline(always)]
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    // Moves delta cells down the column if down, else along the row.
    #[inline(always)]
    pub fn step(&self, down: bool, delta: i8) -> Self {
        if down {
            Self::new(self.x, self.y + delta)
        } else {
            Self::new(self.x + delta, self.y)
        }
    }

    #[inline(always)]
    pub fn neighbors(&self) -> [Position; 4] {
        [
            Self::new(self.x + 1, self.y),
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x, self.y - 1),
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy)]
pub struct Strider {
    base: i16,
    step: i16,
    len: i8,
    down: bool,
    lane: i8,
}

impl Strider {
    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }

    #[inline(always)]
    pub fn position(&self, idx: i8) -> Position {
        if self.down {
            Position::new(self.lane, idx)
        } else {
            Position::new(idx, self.lane)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    // A row, walked left to right.
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
            down: false,
            lane: row,
        }
    }

    // A column, walked top to bottom.
    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols as i16,
            len: self.rows,
            down: true,
            lane: col,
        }
    }

    #[inline(always)]
    pub fn lane(&self, down: bool, lane: i8) -> Strider {
        if down {
            self.down(lane)
        } else {
            self.across(lane)
        }
    }

    #[inline(always)]
    pub fn num_lanes(&self, down: bool) -> i8 {
        if down { self.cols } else { self.rows }
    }

    #[inline(always)]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.cols && pos.y < self.rows
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> usize {
        self.at_row_col(pos.y, pos.x)
    }

    #[inline(always)]
    pub fn area(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    // Row-major, the order the fixtures are written in.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |y| (0..cols).map(move |x| Position::new(x, y)))
    }
}
