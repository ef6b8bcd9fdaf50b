/// Seeker-side weights: how well a posting fits a candidate's résumé.
pub const JOB_MATCH_WEIGHTS: JobMatchWeights = JobMatchWeights {
    skills: 0.50,
    experience: 0.25,
    location: 0.15,
    recency: 0.10,
};

/// Recruiter-side weights: how well an applicant fits a posting.
pub const CANDIDATE_MATCH_WEIGHTS: CandidateMatchWeights = CandidateMatchWeights {
    skills: 0.40,
    experience: 0.30,
    education: 0.20,
    location: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct JobMatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub recency: f64,
}

impl JobMatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.recency
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateMatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
}

impl CandidateMatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.location
    }
}
