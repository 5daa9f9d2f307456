// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Debug)]
pub struct Stats {
    count: f64, // should be a non-negative int barring overflows
    mean: f64,
    m2: f64,
}

impl Default for Stats {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            count: 0.0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    // https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm
    #[inline(always)]
    pub fn update(&mut self, new_value: f64) {
        self.count += 1.0;
        let delta = new_value - self.mean;
        self.mean += delta / self.count;
        let delta2 = new_value - self.mean;
        self.m2 += delta * delta2;
    }

    // https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm
    #[inline(always)]
    pub fn update_bulk(&mut self, other: &Stats) {
        let original_count = self.count;
        self.count += other.count;
        if self.count != 0.0 {
            let delta = other.mean - self.mean;
            let delta_mean = delta * (other.count / self.count);
            self.mean += delta_mean;
            self.m2 += other.m2 + delta * delta_mean * original_count;
        }
    }

    #[inline(always)]
    pub fn count(&self) -> f64 {
        self.count
    }

    #[inline(always)]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline(always)]
    pub fn variance(&self) -> f64 {
        if self.count < 2.0 {
            0.0
        } else {
            self.m2 / (self.count - 1.0)
        }
    }

    #[inline(always)]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}

// Results of one strategy against another, from the first one's side.
#[derive(Clone, Debug, Default)]
pub struct MatchTally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub score: Stats,
    pub opponent_score: Stats,
    pub spread: Stats,
}

impl MatchTally {
    pub fn record(&mut self, score: i32, opponent_score: i32) {
        match score.cmp(&opponent_score) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
        }
        self.score.update(score as f64);
        self.opponent_score.update(opponent_score as f64);
        self.spread.update((score - opponent_score) as f64);
    }

    pub fn merge(&mut self, other: &MatchTally) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
        self.score.update_bulk(&other.score);
        self.opponent_score.update_bulk(&other.opponent_score);
        self.spread.update_bulk(&other.spread);
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    // Ties count as half a win.
    pub fn win_rate(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            0.0
        } else {
            (self.wins as f64 + 0.5 * self.ties as f64) / games as f64
        }
    }
}
