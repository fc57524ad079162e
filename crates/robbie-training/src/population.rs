use rand::RngCore;
use robbie_policy::{breeder::SharedBreeder, policy::Policy};

use crate::{agent::Agent, statistics::ScoreSummary};

/// A fixed-size cohort of agents sharing one breeder.
///
/// # Ranking
///
/// [`Self::rank`] is a *stable* sort by descending score: agents with equal
/// scores keep their previous relative order. [`Self::alpha`],
/// [`Self::runt`] and [`Self::choose_parents`] all read the ranked order.
///
/// # Lifecycle
///
/// A population is either founded ([`Self::founding`]) or bred from a ranked
/// predecessor ([`Self::next_generation`]). Its size never changes.
#[derive(Debug, Clone)]
pub struct Population {
    agents: Vec<Agent>,
    breeder: SharedBreeder,
}

impl Population {
    /// Creates `size` agents from the breeder with no parents and no mutation.
    #[must_use]
    pub fn founding(size: usize, breeder: SharedBreeder, rng: &mut dyn RngCore) -> Self {
        let agents = (0..size)
            .map(|_| Agent::new(breeder.spawn(0.0, &[], rng)))
            .collect();
        Self { agents, breeder }
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn breeder(&self) -> &SharedBreeder {
        &self.breeder
    }

    /// Sorts agents into descending score order, keeping ties in place.
    pub fn rank(&mut self) {
        self.agents.sort_by(|a, b| b.score().cmp(&a.score()));
    }

    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.agents.is_sorted_by(|a, b| a.score() >= b.score())
    }

    /// The best agent.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty or has not been ranked.
    #[must_use]
    pub fn alpha(&self) -> &Agent {
        assert!(self.is_ranked(), "population must be ranked");
        self.agents.first().expect("population is never empty")
    }

    /// The worst agent.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty or has not been ranked.
    #[must_use]
    pub fn runt(&self) -> &Agent {
        assert!(self.is_ranked(), "population must be ranked");
        self.agents.last().expect("population is never empty")
    }

    /// Ranks the population and returns its top `min(num_parents, len)` agents.
    pub fn choose_parents(&mut self, num_parents: usize) -> &[Agent] {
        self.rank();
        let count = num_parents.min(self.agents.len());
        &self.agents[..count]
    }

    /// Breeds a same-size successor from the top `num_parents` agents.
    #[must_use]
    pub fn next_generation(
        &mut self,
        num_parents: usize,
        mutation_rate: f64,
        rng: &mut dyn RngCore,
    ) -> Self {
        let size = self.agents.len();
        let breeder = self.breeder.clone();
        let parents = self
            .choose_parents(num_parents)
            .iter()
            .map(|agent| agent.policy().as_ref())
            .collect::<Vec<&dyn Policy>>();
        let agents = (0..size)
            .map(|_| Agent::new(breeder.spawn(mutation_rate, &parents, rng)))
            .collect();
        Self { agents, breeder }
    }

    /// Descriptive statistics of all current scores.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn score_summary(&self) -> ScoreSummary {
        ScoreSummary::new(self.agents.iter().map(Agent::score))
            .expect("population is never empty")
    }
}
