use std::collections::HashSet;

use resume_analyzer::keywords::{technical_terms, TECH_TERMS};
use resume_analyzer::scoring::{experience_score, score_resume};
use resume_analyzer::{
    analyze, extract_keywords, Analyzer, HeuristicChunker, MatchResult, SubstringMatcher, Tier,
    WholeWordMatcher,
};

const JOB: &str = "We need a Python developer with AWS and Docker experience";

const PLATFORM_JOB: &str = "\
Senior Platform Engineer

About the role: you will own our Kubernetes clusters and CI pipelines. \
Strong knowledge of Go, Terraform, PostgreSQL and observability tooling. \
Experience with incident response, capacity planning and cost optimization. \
Agile team, remote friendly. Salary: 150000.";

const RESUMES: &[&str] = &[
    "",
    "   \n\t",
    "Senior Software Engineer with 8 years of experience running Kubernetes and Go services, \
     Terraform modules, PostgreSQL tuning, incident response and capacity planning. Agile.",
    "Marketing manager. SEO, SEM, analytics and sales leadership.",
    "javascript javascript javascript",
];

fn all_scores(r: &MatchResult) -> [u8; 6] {
    [
        r.score,
        r.keyword_score,
        r.skill_score,
        r.experience_score,
        r.density_score,
        r.format_score,
    ]
}

#[test]
fn matched_and_missing_partition_the_keyword_set() {
    let analyzer = Analyzer::default();
    for job in [JOB, PLATFORM_JOB] {
        let keywords = analyzer.keywords(job);
        assert!(!keywords.is_empty());
        for resume in RESUMES {
            let result = analyzer.analyze(resume, job);
            let mut merged: Vec<&String> = result.matched.iter().chain(&result.missing).collect();
            merged.sort();
            let mut expected: Vec<&String> = keywords.iter().collect();
            expected.sort();
            assert_eq!(merged, expected, "resume {resume:?}");
            assert!(result.matched.iter().all(|m| !result.missing.contains(m)));
        }
    }
}

#[test]
fn partition_preserves_keyword_order() {
    let analyzer = Analyzer::default();
    let keywords = analyzer.keywords(PLATFORM_JOB);
    let result = analyzer.analyze(RESUMES[2], PLATFORM_JOB);

    let in_order = |subset: &[String]| {
        let positions: Vec<usize> = subset
            .iter()
            .map(|k| keywords.terms().iter().position(|t| t == k).unwrap())
            .collect();
        positions.windows(2).all(|w| w[0] < w[1])
    };
    assert!(in_order(&result.matched));
    assert!(in_order(&result.missing));
}

#[test]
fn every_score_is_within_bounds() {
    for job in [JOB, PLATFORM_JOB, "", "x"] {
        for resume in RESUMES {
            let result = analyze(resume, job);
            assert!(all_scores(&result).iter().all(|s| *s <= 100), "{result:?}");
        }
    }
}

#[test]
fn analysis_is_idempotent() {
    for resume in RESUMES {
        assert_eq!(analyze(resume, PLATFORM_JOB), analyze(resume, PLATFORM_JOB));
    }
}

#[test]
fn empty_job_description_yields_canonical_empty_result() {
    let result = analyze(RESUMES[2], "");
    assert_eq!(all_scores(&result), [0, 0, 0, 0, 0, 100]);
    assert!(result.matched.is_empty());
    assert!(result.missing.is_empty());
}

#[test]
fn python_aws_docker_scenario() {
    assert_eq!(technical_terms(JOB), vec!["python", "aws", "docker"]);

    let keywords = extract_keywords(JOB, &HeuristicChunker);
    assert_eq!(keywords.technical(), ["python", "aws", "docker"]);
    for term in keywords.generic() {
        assert!(!TECH_TERMS.contains(&term.as_str()));
    }
    let unique: HashSet<&String> = keywords.iter().collect();
    assert_eq!(unique.len(), keywords.len());
}

#[test]
fn experience_scenario() {
    let resume = "5 years of experience as a Senior Software Engineer".to_lowercase();
    assert_eq!(experience_score(&resume, 60), 90);
}

#[test]
fn empty_resume_is_classified_low() {
    for job in [JOB, PLATFORM_JOB] {
        let keywords = extract_keywords(job, &HeuristicChunker);
        let result = score_resume("", &keywords, &SubstringMatcher);

        assert!(result.matched.is_empty());
        assert_eq!(result.missing, keywords.terms());
        assert_eq!(result.keyword_score, 0);
        assert_eq!(result.skill_score, 0);
        assert_eq!(result.density_score, 0);
        assert_eq!(result.tier(), Tier::Low);
    }
}

#[test]
fn matching_resume_outscores_unrelated_one() {
    let good = analyze(RESUMES[2], PLATFORM_JOB);
    let unrelated = analyze(RESUMES[3], PLATFORM_JOB);
    assert!(good.score > unrelated.score);
    assert!(good.keyword_score > unrelated.keyword_score);
}

#[test]
fn substring_matching_is_intentionally_loose() {
    let job = "Java and Go backend";
    let resume = "JavaScript, Django";

    let loose = analyze(resume, job);
    assert!(loose.matched.contains(&"java".to_string()));
    assert!(loose.matched.contains(&"go".to_string()));

    let strict = Analyzer::new(Box::new(HeuristicChunker), Box::new(WholeWordMatcher))
        .analyze(resume, job);
    assert!(strict.missing.contains(&"java".to_string()));
    assert!(strict.missing.contains(&"go".to_string()));
}

#[test]
fn tier_boundaries() {
    assert_eq!(Tier::of(49), Tier::Low);
    assert_eq!(Tier::of(50), Tier::Medium);
    assert_eq!(Tier::of(79), Tier::Medium);
    assert_eq!(Tier::of(80), Tier::High);
}

#[test]
fn metric_tiers_follow_each_score() {
    for resume in RESUMES {
        let result = analyze(resume, PLATFORM_JOB);
        let tiers = result.tiers();
        assert_eq!(tiers.overall, Tier::of(result.score));
        assert_eq!(tiers.keywords, Tier::of(result.keyword_score));
        assert_eq!(tiers.skills, Tier::of(result.skill_score));
        assert_eq!(tiers.experience, Tier::of(result.experience_score));
        assert_eq!(tiers.density, Tier::of(result.density_score));
        assert_eq!(tiers.format, Tier::of(result.format_score));
        assert_eq!(tiers.format, Tier::High);
    }

    let empty = MatchResult::empty().tiers();
    assert_eq!(empty.overall, Tier::Low);
    assert_eq!(empty.format, Tier::High);
}

#[test]
fn repeated_keyword_counts_every_occurrence() {
    let result = analyze("python python", "Python");
    assert_eq!(result.matched, vec!["python"]);
    assert_eq!(result.density_score, 100);

    // 2 occurrences in 100 words hits the 2% target; 1 would only reach 50.
    let twice = analyze(&format!("python python {}", "filler ".repeat(98)), "Python");
    assert_eq!(twice.density_score, 100);
    let once = analyze(&format!("python {}", "filler ".repeat(99)), "Python");
    assert_eq!(once.density_score, 50);
}
