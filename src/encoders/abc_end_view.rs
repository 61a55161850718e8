use crate::engine::{Comparator, ConstraintEngine, LinearExpr, VarHandle};
use crate::error::{PuzzleError, Result};
use crate::grid::{Cell, Grid, Position};
use crate::puzzle::{AllowedValues, PuzzleData};
use crate::solve::PuzzleEncoder;

/// ABC End View: place the letters `A..` so that every row and column
/// contains each letter exactly once (the rest of the cells stay blank),
/// and each edge clue names the first letter visible from that edge.
///
/// The `letters` param gives the alphabet size; `rows[r]` is the
/// `[left, right]` clue pair for row `r` and `cols[c]` the `[top, bottom]`
/// pair, `-` meaning no clue.
///
/// The encoding uses reified letter literals: one boolean per (cell,
/// letter) plus a blank literal per cell. "Each letter exactly once" is a
/// unit sum over a line's literals; an edge clue ℓ becomes, for every
/// prefix of the line and every other letter m, "the prefix cannot be all
/// blanks followed by m" — a linear constraint over the literals.
#[derive(Debug)]
pub struct ABCEndViewSolver {
    clues: Grid,
    size: usize,
    letters: u32,
    row_clues: Vec<(Option<u32>, Option<u32>)>,
    col_clues: Vec<(Option<u32>, Option<u32>)>,
    vars: Vec<VarHandle>,
}

impl ABCEndViewSolver {
    pub fn new(data: &PuzzleData) -> Result<Self> {
        data.check_dimensions()?;
        if data.num_rows != data.num_cols {
            return Err(PuzzleError::Encoder(format!(
                "end view grid must be square, got {}x{}",
                data.num_rows, data.num_cols
            ))
            .into());
        }
        let size = data.num_rows;
        let letters = data.require_param("letters")? as u32;
        if letters == 0 || letters as usize > size {
            return Err(PuzzleError::Encoder(format!(
                "letters must be in 1..={size}, got {letters}"
            ))
            .into());
        }

        let vocabulary = AllowedValues::letters_up_to(letters);
        vocabulary.validate_grid(&data.grid)?;
        let clues = Grid::from_tokens(&data.grid)?;

        let row_clues = parse_clue_pairs("rows", data.rows.as_deref(), size, &vocabulary)?;
        let col_clues = parse_clue_pairs("cols", data.cols.as_deref(), size, &vocabulary)?;

        Ok(Self {
            clues,
            size,
            letters,
            row_clues,
            col_clues,
            vars: Vec::new(),
        })
    }

    /// Registry factory.
    pub fn factory(data: &PuzzleData) -> Result<Box<dyn PuzzleEncoder>> {
        Ok(Box::new(Self::new(data)?))
    }

    fn var(&self, pos: Position) -> VarHandle {
        self.vars[pos.row as usize * self.size + pos.col as usize]
    }
}

/// Per-line literal bookkeeping while building: `blank[i]` is the blank
/// literal of the line's `i`-th cell, `letter[i][m-1]` its literal for
/// letter `m`.
struct LineLiterals {
    blank: Vec<VarHandle>,
    letter: Vec<Vec<VarHandle>>,
}

impl PuzzleEncoder for ABCEndViewSolver {
    fn build_constraints(&mut self, engine: &mut dyn ConstraintEngine) -> Result<()> {
        let n = self.size;
        let k = self.letters;

        // One integer per cell: 0 is blank, 1..=k the letters.
        self.vars = Vec::with_capacity(n * n);
        let mut blank_lits = Vec::with_capacity(n * n);
        let mut letter_lits: Vec<Vec<VarHandle>> = Vec::with_capacity(n * n);
        for (pos, cell) in self.clues.iter() {
            let var = engine.new_int_var(0, k as i64, &format!("cell_{}_{}", pos.row, pos.col));
            self.vars.push(var);

            let blank = engine.new_bool_var(&format!("blank_{}_{}", pos.row, pos.col));
            engine.post_reified_eq(var, 0, blank);
            blank_lits.push(blank);

            let mut lits = Vec::with_capacity(k as usize);
            for letter in 1..=k {
                let lit = engine.new_bool_var(&format!(
                    "is_{}_{}_{}",
                    letter_char(letter),
                    pos.row,
                    pos.col
                ));
                engine.post_reified_eq(var, letter as i64, lit);
                lits.push(lit);
            }
            letter_lits.push(lits);

            if let Some(value) = letter_value(cell) {
                engine.post_eq(&LinearExpr::var(var), &LinearExpr::constant(value as i64));
            }
        }

        let line_literals = |cells: &[Position]| LineLiterals {
            blank: cells
                .iter()
                .map(|p| blank_lits[p.row as usize * n + p.col as usize])
                .collect(),
            letter: cells
                .iter()
                .map(|p| letter_lits[p.row as usize * n + p.col as usize].clone())
                .collect(),
        };

        for index in 0..n {
            let row: Vec<Position> = (0..n)
                .map(|c| Position::new(index as i64, c as i64))
                .collect();
            let col: Vec<Position> = (0..n)
                .map(|r| Position::new(r as i64, index as i64))
                .collect();

            for line in [&row, &col] {
                let lits = line_literals(line);
                for letter in 1..=k {
                    let letter_sum: Vec<VarHandle> = lits
                        .letter
                        .iter()
                        .map(|cell| cell[letter as usize - 1])
                        .collect();
                    engine.post_linear(&LinearExpr::sum(&letter_sum), Comparator::Eq, 1);
                }
            }

            let (row_left, row_right) = self.row_clues[index];
            post_end_view(engine, &line_literals(&row), row_left, k);
            let reversed: Vec<Position> = row.iter().rev().copied().collect();
            post_end_view(engine, &line_literals(&reversed), row_right, k);

            let (col_top, col_bottom) = self.col_clues[index];
            post_end_view(engine, &line_literals(&col), col_top, k);
            let reversed: Vec<Position> = col.iter().rev().copied().collect();
            post_end_view(engine, &line_literals(&reversed), col_bottom, k);
        }
        Ok(())
    }

    fn extract_solution(&self, engine: &dyn ConstraintEngine) -> Result<Grid> {
        let mut solution = Grid::filled(self.size, self.size, Cell::Blank)?;
        for (i, var) in self.vars.iter().enumerate() {
            let value = engine.value_of(*var)?;
            let cell = if value == 0 {
                Cell::Blank
            } else {
                Cell::Letter(letter_char(value as u32))
            };
            let pos = Position::new((i / self.size) as i64, (i % self.size) as i64);
            solution.set(pos, cell)?;
        }
        Ok(solution)
    }
}

/// Posts the end-view rule for one clue along one line, reading the line
/// from the clue's edge: no other letter may appear while everything
/// before it is blank. For each prefix length `p` and letter `m != clue`,
/// `sum(blank[0..p]) + is_m[p] <= p` forbids "p blanks then m".
fn post_end_view(
    engine: &mut dyn ConstraintEngine,
    line: &LineLiterals,
    clue: Option<u32>,
    letters: u32,
) {
    let Some(clue) = clue else { return };
    for p in 0..line.blank.len() {
        for m in 1..=letters {
            if m == clue {
                continue;
            }
            let mut expr = LinearExpr::sum(&line.blank[0..p]);
            expr = expr.term(1, line.letter[p][m as usize - 1]);
            engine.post_linear(&expr, Comparator::Le, p as i64);
        }
    }
}

fn letter_char(value: u32) -> char {
    (b'A' + value as u8 - 1) as char
}

fn parse_clue_pairs(
    field: &'static str,
    clues: Option<&[Vec<String>]>,
    size: usize,
    vocabulary: &AllowedValues,
) -> Result<Vec<(Option<u32>, Option<u32>)>> {
    let Some(clues) = clues else {
        return Ok(vec![(None, None); size]);
    };
    vocabulary.validate_grid(clues)?;
    let mut pairs = Vec::with_capacity(size);
    for entry in clues {
        if entry.len() != 2 {
            return Err(PuzzleError::Encoder(format!(
                "each `{field}` entry must be a [near, far] clue pair, got {} tokens",
                entry.len()
            ))
            .into());
        }
        pairs.push((clue_value(&entry[0]), clue_value(&entry[1])));
    }
    Ok(pairs)
}

fn clue_value(token: &str) -> Option<u32> {
    letter_value(&Cell::parse(token))
}

/// The 1-based alphabet value of a letter cell. Single-letter directional
/// codes (`U`, `D`, `L`, `R`) parse as arrows, but in this puzzle they are
/// letters like any other.
fn letter_value(cell: &Cell) -> Option<u32> {
    let c = match cell {
        Cell::Letter(c) => *c,
        Cell::Arrow(dir) if dir.code().len() == 1 => dir.code().chars().next()?,
        _ => return None,
    };
    Some((c.to_ascii_uppercase() as u8 - b'A' + 1) as u32)
}
