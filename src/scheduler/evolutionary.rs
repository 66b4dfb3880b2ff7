//! Evolutionary search (spec §9, SPEC_FULL §4.9), grounded in the source
//! project's `GeneticAlgorithmScheduler`: a population of randomly-seeded
//! candidate Grids is evolved by tournament selection, single-point
//! crossover and point mutation, scored by the same Validator used
//! everywhere else. A run is considered "reasonably good" once the best
//! individual's score reaches -100 or better — the literal threshold the
//! source scheduler used to decide whether to keep searching.
use super::rooms::room_type_for_subject;
use crate::grid::Grid;
use crate::types::{BatchLabel, Config, Faculty, Placement, Room, SectionLabel, SlotKey, Subject, VALID_LAB_STARTS};
use crate::validator::{self, ValidationReport};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const POPULATION_SIZE: usize = 40;
const GENERATIONS: usize = 100;
const MUTATION_RATE: f64 = 0.1;
const ELITISM_COUNT: usize = 2;
const SUCCESS_THRESHOLD: i64 = -100;

/// One unit of required teaching time: a subject block for a section, with
/// its batch split (if any) resolved up front so mutation never has to
/// invent a batch roster.
#[derive(Debug, Clone)]
struct Block {
    section: SectionLabel,
    subject_index: usize,
    duration: u8,
    batches: Vec<BatchLabel>,
}

/// A randomly chosen expression of one Block: a day/start period plus a
/// faculty and room choice per (period, batch) — chosen without regard to
/// conflicts, since conflicts are scored, not prevented, by this search.
#[derive(Debug, Clone)]
struct Gene {
    day: u8,
    start: u8,
    faculty: Vec<crate::types::FacultyId>,
    rooms: Vec<crate::types::RoomNumber>,
}

type Chromosome = Vec<Gene>;

struct Catalog<'a> {
    subjects: &'a [Subject],
    faculty: &'a [Faculty],
    rooms: &'a [Room],
}

fn build_blocks(sections: &[(SectionLabel, Vec<BatchLabel>)], subjects: &[Subject]) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (section, batches) in sections {
        for (subject_index, subject) in subjects.iter().enumerate() {
            let duration = subject.duration();
            let count = subject.hours_per_week / duration as u32;
            let batch_list = if subject.batches_required { batches.clone() } else { Vec::new() };
            for _ in 0..count {
                blocks.push(Block {
                    section: section.clone(),
                    subject_index,
                    duration,
                    batches: batch_list.clone(),
                });
            }
        }
    }
    blocks
}

fn random_gene(rng: &mut StdRng, block: &Block, catalog: &Catalog, num_days: u8, periods_per_day: u8) -> Gene {
    let subject = &catalog.subjects[block.subject_index];
    let room_type = room_type_for_subject(subject);

    let day = rng.gen_range(0..num_days);
    let start = if block.duration > 1 {
        *VALID_LAB_STARTS.choose(rng).unwrap()
    } else {
        rng.gen_range(1..=periods_per_day)
    };

    let qualified: Vec<_> = catalog.faculty.iter().filter(|f| f.can_teach(&subject.code)).collect();
    let typed_rooms: Vec<_> = catalog.rooms.iter().filter(|r| r.room_type == room_type).collect();

    let slots_needed = block.duration as usize * block.batches.len().max(1);
    let mut faculty = Vec::with_capacity(slots_needed);
    let mut rooms = Vec::with_capacity(slots_needed);
    for _ in 0..slots_needed {
        faculty.push(
            qualified
                .choose(rng)
                .map(|f| f.id.clone())
                .unwrap_or_else(|| crate::types::FacultyId("UNASSIGNED".to_string())),
        );
        rooms.push(
            typed_rooms
                .choose(rng)
                .map(|r| r.number.clone())
                .unwrap_or_else(|| crate::types::RoomNumber("UNASSIGNED".to_string())),
        );
    }

    Gene { day, start, faculty, rooms }
}

fn express(blocks: &[Block], chromosome: &Chromosome, catalog: &Catalog, num_days: u8, periods_per_day: u8) -> Grid {
    let mut grid = Grid::new(num_days, periods_per_day);
    for (block, gene) in blocks.iter().zip(chromosome.iter()) {
        let subject = &catalog.subjects[block.subject_index];
        let batches: Vec<Option<BatchLabel>> = if block.batches.is_empty() {
            vec![None]
        } else {
            block.batches.iter().cloned().map(Some).collect()
        };

        let mut idx = 0;
        for offset in 0..block.duration {
            let slot = SlotKey::new(gene.day, gene.start + offset);
            for batch in &batches {
                let placement = Placement {
                    section: block.section.clone(),
                    slot,
                    subject_code: subject.code.clone(),
                    faculty_id: gene.faculty.get(idx).cloned().unwrap_or_else(|| crate::types::FacultyId("UNASSIGNED".to_string())),
                    room_number: gene.rooms.get(idx).cloned().unwrap_or_else(|| crate::types::RoomNumber("UNASSIGNED".to_string())),
                    batch: batch.clone(),
                    is_lab_continuation: offset > 0,
                };
                idx += 1;
                grid.insert_unchecked(placement);
            }
        }
    }
    grid
}

fn fitness(blocks: &[Block], chromosome: &Chromosome, catalog: &Catalog, config: &Config) -> (i64, Grid, ValidationReport) {
    let grid = express(blocks, chromosome, catalog, config.num_days(), config.periods_per_day);
    let report = validator::validate(&grid, catalog.subjects, config.max_consecutive_theory, config.limit_first_period);
    (report.score, grid, report)
}

fn tournament_select<'a>(rng: &mut StdRng, population: &'a [(Chromosome, i64)]) -> &'a Chromosome {
    let a = &population[rng.gen_range(0..population.len())];
    let b = &population[rng.gen_range(0..population.len())];
    if a.1 >= b.1 {
        &a.0
    } else {
        &b.0
    }
}

fn crossover(rng: &mut StdRng, a: &Chromosome, b: &Chromosome) -> Chromosome {
    if a.is_empty() {
        return a.clone();
    }
    let point = rng.gen_range(0..a.len());
    a[..point].iter().cloned().chain(b[point..].iter().cloned()).collect()
}

fn mutate(rng: &mut StdRng, chromosome: &mut Chromosome, blocks: &[Block], catalog: &Catalog, num_days: u8, periods_per_day: u8) {
    for (gene, block) in chromosome.iter_mut().zip(blocks.iter()) {
        if rng.gen_bool(MUTATION_RATE) {
            *gene = random_gene(rng, block, catalog, num_days, periods_per_day);
        }
    }
}

/// Runs the evolutionary search for one section roster and returns the best
/// Grid found, whether it met the "reasonably good" threshold, and the
/// generation count actually run.
pub fn schedule_evolutionary(
    sections: &[(SectionLabel, Vec<BatchLabel>)],
    subjects: &[Subject],
    faculty: &[Faculty],
    rooms: &[Room],
    config: &Config,
) -> (Grid, ValidationReport, bool, u64) {
    let catalog = Catalog { subjects, faculty, rooms };
    let blocks = build_blocks(sections, subjects);
    let num_days = config.num_days();
    let periods_per_day = config.periods_per_day;

    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut population: Vec<(Chromosome, i64)> = (0..POPULATION_SIZE)
        .map(|_| {
            let chromosome: Chromosome = blocks.iter().map(|b| random_gene(&mut rng, b, &catalog, num_days, periods_per_day)).collect();
            let (score, _, _) = fitness(&blocks, &chromosome, &catalog, config);
            (chromosome, score)
        })
        .collect();
    population.sort_by(|a, b| b.1.cmp(&a.1));

    let mut generations_run: u64 = 0;
    for _ in 0..GENERATIONS {
        generations_run += 1;
        if population[0].1 >= SUCCESS_THRESHOLD {
            break;
        }

        let mut next: Vec<(Chromosome, i64)> = population[..ELITISM_COUNT.min(population.len())].to_vec();
        while next.len() < POPULATION_SIZE {
            let parent_a = tournament_select(&mut rng, &population);
            let parent_b = tournament_select(&mut rng, &population);
            let mut child = crossover(&mut rng, parent_a, parent_b);
            mutate(&mut rng, &mut child, &blocks, &catalog, num_days, periods_per_day);
            let (score, _, _) = fitness(&blocks, &child, &catalog, config);
            next.push((child, score));
        }
        next.sort_by(|a, b| b.1.cmp(&a.1));
        population = next;
    }

    let (best_chromosome, best_score) = population.into_iter().next().expect("population is never empty");
    let (_, grid, report) = fitness(&blocks, &best_chromosome, &catalog, config);
    (grid, report, best_score >= SUCCESS_THRESHOLD, generations_run)
}
