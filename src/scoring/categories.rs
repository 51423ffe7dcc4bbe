//! Per-category mindshare aggregation

use super::normalizer::SocialProject;
use serde::{Deserialize, Serialize};

const TOP_PROJECTS_PER_CATEGORY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProject {
    pub name: String,
    pub mindshare_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverview {
    pub name: String,
    pub mindshare_score: f64,
    /// Mean of the member projects' 24h change, one decimal
    pub change_24h: f64,
    pub project_count: usize,
    pub top_projects: Vec<CategoryProject>,
}

/// Group projects by category, highest total mindshare first
///
/// Projects without a name are ignored; a missing category groups under
/// `"other"`.
pub fn summarize_categories(projects: &[SocialProject]) -> Vec<CategoryOverview> {
    let mut overviews: Vec<CategoryOverview> = Vec::new();
    let mut change_sums: Vec<f64> = Vec::new();

    for project in projects {
        let Some(name) = project.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            continue;
        };
        let category = project
            .category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "other".to_string());
        let mindshare = if project.mindshare_score.is_finite() {
            project.mindshare_score.max(0.0)
        } else {
            0.0
        };
        let change = if project.change_24h.is_finite() {
            project.change_24h
        } else {
            0.0
        };

        let idx = match overviews.iter().position(|o| o.name == category) {
            Some(idx) => idx,
            None => {
                overviews.push(CategoryOverview {
                    name: category,
                    mindshare_score: 0.0,
                    change_24h: 0.0,
                    project_count: 0,
                    top_projects: Vec::new(),
                });
                change_sums.push(0.0);
                overviews.len() - 1
            }
        };

        let overview = &mut overviews[idx];
        overview.mindshare_score += mindshare;
        overview.project_count += 1;
        overview.top_projects.push(CategoryProject {
            name: name.to_string(),
            mindshare_score: mindshare,
        });
        change_sums[idx] += change;
    }

    for (overview, sum) in overviews.iter_mut().zip(change_sums) {
        let mean = sum / overview.project_count as f64;
        overview.change_24h = (mean * 10.0).round() / 10.0;

        overview.top_projects.sort_by(|a, b| {
            b.mindshare_score
                .partial_cmp(&a.mindshare_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        overview.top_projects.truncate(TOP_PROJECTS_PER_CATEGORY);
    }

    overviews.sort_by(|a, b| {
        b.mindshare_score
            .partial_cmp(&a.mindshare_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    overviews
}
