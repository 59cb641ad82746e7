// src/services/stats_client.rs

//! Remote stats client.
//!
//! Issues one GraphQL query per account and maps the response onto
//! [`ProfileDetail`]. The client reports facts only: it never retries and
//! holds no state beyond the shared HTTP connection pool.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult, Result};
use crate::models::{
    AccountIdentifier, ClientConfig, Difficulty, DifficultyCounts, ProfileDetail, SkillTier,
    TopicCount, WorldRank,
};
use crate::utils::http::create_async_client;

const PROFILE_QUERY: &str = r#"
    query getUserProfile($username: String!) {
        matchedUser(username: $username) {
            username
            submitStats: submitStatsGlobal {
                acSubmissionNum {
                    difficulty
                    count
                    submissions
                }
            }
            tagProblemCounts {
                advanced {
                    tagName
                    tagSlug
                    problemsSolved
                }
                intermediate {
                    tagName
                    tagSlug
                    problemsSolved
                }
                fundamental {
                    tagName
                    tagSlug
                    problemsSolved
                }
            }
            profile {
                realName
                aboutMe
                userAvatar
                location
                skillTags
                websites
                ranking
            }
        }
    }
"#;

/// A source of per-account statistics.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Look up one account.
    async fn fetch(&self, identifier: &AccountIdentifier) -> LookupResult<ProfileDetail>;
}

/// GraphQL client for the remote stats service.
pub struct StatsClient {
    client: Client,
    endpoint: String,
}

impl StatsClient {
    /// Build a client with its own HTTP connection pool.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, &config.endpoint))
    }

    /// Build a client around an existing HTTP client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Map a raw response body onto a profile detail.
    pub fn parse_response(
        identifier: &AccountIdentifier,
        body: &str,
    ) -> LookupResult<ProfileDetail> {
        let response: GraphQlResponse = serde_json::from_str(body)
            .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

        match response.data {
            Some(ResponseData {
                matched_user: Some(user),
            }) => Ok(user.into_detail(identifier)),
            Some(ResponseData { matched_user: None }) => Err(LookupError::AccountNotFound),
            None if !response.errors.is_empty() => {
                let messages: Vec<&str> =
                    response.errors.iter().map(|e| e.message.as_str()).collect();
                let joined = messages.join("; ");
                log::debug!("Remote rejected {}: {}", identifier, joined);
                Err(LookupError::MalformedResponse(joined))
            }
            None => Err(LookupError::MalformedResponse(
                "response carries neither data nor errors".to_string(),
            )),
        }
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch(&self, identifier: &AccountIdentifier) -> LookupResult<ProfileDetail> {
        let request = GraphQlRequest {
            query: PROFILE_QUERY,
            variables: Variables {
                username: identifier.as_str(),
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(identifier, &body)
    }
}

// Request/Response structures

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    username: Option<String>,
    submit_stats: Option<SubmitStats>,
    tag_problem_counts: Option<TagProblemCounts>,
    profile: Option<RawProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    #[serde(default)]
    ac_submission_num: Vec<DifficultyBucket>,
}

#[derive(Debug, Deserialize)]
struct DifficultyBucket {
    difficulty: String,
    count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct TagProblemCounts {
    #[serde(default)]
    advanced: Option<Vec<RawTag>>,
    #[serde(default)]
    intermediate: Option<Vec<RawTag>>,
    #[serde(default)]
    fundamental: Option<Vec<RawTag>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    tag_name: String,
    #[serde(default)]
    tag_slug: Option<String>,
    problems_solved: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    real_name: Option<String>,
    about_me: Option<String>,
    user_avatar: Option<String>,
    location: Option<String>,
    skill_tags: Option<Vec<String>>,
    websites: Option<Vec<String>>,
    ranking: Option<serde_json::Value>,
}

impl MatchedUser {
    fn into_detail(self, requested: &AccountIdentifier) -> ProfileDetail {
        let identifier = self
            .username
            .and_then(AccountIdentifier::new)
            .unwrap_or_else(|| requested.clone());
        let buckets = self
            .submit_stats
            .map(|s| s.ac_submission_num)
            .unwrap_or_default();
        let profile = self.profile.unwrap_or_default();
        let tags = self.tag_problem_counts.unwrap_or_default();

        let mut topics = Vec::new();
        for (tier, raw) in [
            (SkillTier::Fundamental, tags.fundamental),
            (SkillTier::Intermediate, tags.intermediate),
            (SkillTier::Advanced, tags.advanced),
        ] {
            topics.extend(raw.unwrap_or_default().into_iter().map(|t| TopicCount {
                tier,
                slug: t.tag_slug.unwrap_or_default(),
                name: t.tag_name,
                solved: t.problems_solved,
            }));
        }

        ProfileDetail {
            identifier,
            display_name: non_blank(profile.real_name),
            bio: non_blank(profile.about_me),
            avatar: non_blank(profile.user_avatar),
            location: non_blank(profile.location),
            skills: profile.skill_tags.unwrap_or_default(),
            websites: profile.websites.unwrap_or_default(),
            world_rank: WorldRank::from_value(profile.ranking.as_ref()),
            counts: DifficultyCounts {
                total: bucket_count(&buckets, Difficulty::All),
                easy: bucket_count(&buckets, Difficulty::Easy),
                medium: bucket_count(&buckets, Difficulty::Medium),
                hard: bucket_count(&buckets, Difficulty::Hard),
            },
            topics,
        }
    }
}

/// Count for the bucket labeled exactly like `difficulty`, or 0 when absent.
fn bucket_count(buckets: &[DifficultyBucket], difficulty: Difficulty) -> u64 {
    buckets
        .iter()
        .find(|b| b.difficulty == difficulty.label())
        .map_or(0, |b| b.count)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alice() -> AccountIdentifier {
        AccountIdentifier::new("alice").unwrap()
    }

    fn full_body() -> String {
        json!({
            "data": {
                "matchedUser": {
                    "username": "alice",
                    "submitStats": {
                        "acSubmissionNum": [
                            { "difficulty": "All", "count": 60, "submissions": 90 },
                            { "difficulty": "Easy", "count": 30, "submissions": 40 },
                            { "difficulty": "Medium", "count": 20, "submissions": 35 },
                            { "difficulty": "Hard", "count": 10, "submissions": 15 }
                        ]
                    },
                    "tagProblemCounts": {
                        "advanced": [
                            { "tagName": "Dynamic Programming", "tagSlug": "dynamic-programming", "problemsSolved": 7 }
                        ],
                        "intermediate": [],
                        "fundamental": [
                            { "tagName": "Array", "tagSlug": "array", "problemsSolved": 25 }
                        ]
                    },
                    "profile": {
                        "realName": "Alice Kim",
                        "aboutMe": "",
                        "userAvatar": "https://assets.example.com/alice.png",
                        "location": "Seoul",
                        "skillTags": ["rust", "graphs"],
                        "websites": ["https://alice.dev"],
                        "ranking": 15342
                    }
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_full_response() {
        let detail = StatsClient::parse_response(&alice(), &full_body()).unwrap();
        assert_eq!(detail.identifier.as_str(), "alice");
        assert_eq!(detail.display_name.as_deref(), Some("Alice Kim"));
        assert_eq!(detail.bio, None);
        assert_eq!(
            detail.counts,
            DifficultyCounts {
                total: 60,
                easy: 30,
                medium: 20,
                hard: 10
            }
        );
        assert_eq!(detail.world_rank, WorldRank::Ranked(15342));
        assert_eq!(detail.skills, vec!["rust", "graphs"]);
        assert_eq!(detail.topics.len(), 2);
        assert_eq!(detail.topics[0].tier, SkillTier::Fundamental);
        assert_eq!(detail.topics[1].slug, "dynamic-programming");
    }

    #[test]
    fn test_missing_hard_bucket_defaults_to_zero() {
        let body = json!({
            "data": { "matchedUser": {
                "username": "alice",
                "submitStats": { "acSubmissionNum": [
                    { "difficulty": "All", "count": 5 },
                    { "difficulty": "Easy", "count": 4 },
                    { "difficulty": "Medium", "count": 1 }
                ]},
                "profile": { "ranking": 10 }
            }}
        })
        .to_string();

        let detail = StatsClient::parse_response(&alice(), &body).unwrap();
        assert_eq!(detail.counts.hard, 0);
        assert_eq!(detail.counts.total, 5);
    }

    #[test]
    fn test_bucket_labels_are_case_sensitive() {
        let body = json!({
            "data": { "matchedUser": {
                "submitStats": { "acSubmissionNum": [
                    { "difficulty": "all", "count": 5 },
                    { "difficulty": "Easy", "count": 5 }
                ]}
            }}
        })
        .to_string();

        let detail = StatsClient::parse_response(&alice(), &body).unwrap();
        assert_eq!(detail.counts.total, 0);
        assert_eq!(detail.counts.easy, 5);
    }

    #[test]
    fn test_ranking_absent_or_non_numeric() {
        let body = json!({
            "data": { "matchedUser": { "profile": { "ranking": "unranked" } } }
        })
        .to_string();
        let detail = StatsClient::parse_response(&alice(), &body).unwrap();
        assert_eq!(detail.world_rank, WorldRank::NotAvailable);

        let body = json!({ "data": { "matchedUser": {} } }).to_string();
        let detail = StatsClient::parse_response(&alice(), &body).unwrap();
        assert_eq!(detail.world_rank, WorldRank::NotAvailable);
        assert_eq!(detail.identifier.as_str(), "alice");
        assert_eq!(detail.counts, DifficultyCounts::default());
    }

    #[test]
    fn test_null_matched_user_is_not_found() {
        let body = json!({ "data": { "matchedUser": null } }).to_string();
        assert_eq!(
            StatsClient::parse_response(&alice(), &body),
            Err(LookupError::AccountNotFound)
        );

        let body = json!({
            "errors": [{ "message": "That user does not exist." }],
            "data": { "matchedUser": null }
        })
        .to_string();
        assert_eq!(
            StatsClient::parse_response(&alice(), &body),
            Err(LookupError::AccountNotFound)
        );
    }

    #[test]
    fn test_type_mismatch_is_malformed() {
        let body = json!({
            "data": { "matchedUser": {
                "submitStats": { "acSubmissionNum": [
                    { "difficulty": "All", "count": "lots" }
                ]}
            }}
        })
        .to_string();
        assert!(matches!(
            StatsClient::parse_response(&alice(), &body),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_json_and_empty_envelope_are_malformed() {
        assert!(matches!(
            StatsClient::parse_response(&alice(), "<html>rate limited</html>"),
            Err(LookupError::MalformedResponse(_))
        ));
        assert!(matches!(
            StatsClient::parse_response(&alice(), "{}"),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_errors_without_data_are_malformed() {
        let body = json!({
            "errors": [
                { "message": "rate limited" },
                { "message": "try again later" }
            ]
        })
        .to_string();
        assert_eq!(
            StatsClient::parse_response(&alice(), &body),
            Err(LookupError::MalformedResponse(
                "rate limited; try again later".to_string()
            ))
        );
    }
}
