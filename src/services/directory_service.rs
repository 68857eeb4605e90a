use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::{config::DirectoryConfig, utils::AppError, utils::TtlCache};

const HTTP_TIMEOUT_SECS: u64 = 10;
const NEARBY_FALLBACK_LIMIT: usize = 5;

lazy_static! {
    static ref APOSTROPHES: Regex = Regex::new(r"['’‘]").expect("valid regex");
    static ref SEPARATORS: Regex = Regex::new(r"[-\s]+").expect("valid regex");
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub country_code: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub name: String,
    pub location: String,
    pub website: String,
    pub domains: Vec<String>,
    pub country: String,
    pub alpha_two_code: String,
    pub state_province: String,
    pub city: String,
    pub programs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

#[derive(Debug, Serialize, Clone, Copy, utoipa::ToSchema)]
pub struct Program {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
}

#[derive(Debug, Serialize, Clone, utoipa::ToSchema)]
pub struct TuitionBand {
    pub country: String,
    #[schema(value_type = String)]
    pub currency: &'static str,
    pub min: u32,
    pub max: u32,
}

/// Record as returned by the university directory API.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawUniversity {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub alpha_two_code: Option<String>,
    #[serde(default, rename = "state-province", alias = "state_province")]
    pub state_province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub web_pages: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl RawUniversity {
    fn into_university(self, distance: Option<&str>) -> University {
        let city = self.city.unwrap_or_default();
        let state_province = self.state_province.unwrap_or_default();
        let location = [city.as_str(), state_province.as_str(), self.country.as_str()]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        University {
            name: self.name,
            location,
            website: self.web_pages.into_iter().next().unwrap_or_else(|| "#".to_string()),
            domains: self.domains,
            country: self.country,
            alpha_two_code: self.alpha_two_code.unwrap_or_default(),
            state_province,
            city,
            programs: Vec::new(),
            distance: distance.map(str::to_string),
        }
    }
}

/// Upstream public directories. Implemented over HTTP in production and
/// faked in tests.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<Country>, AppError>;
    async fn fetch_cities(&self, country_name: &str) -> Result<Vec<String>, AppError>;
    async fn search_universities(
        &self,
        name: Option<&str>,
        country_name: &str,
    ) -> Result<Vec<RawUniversity>, AppError>;
}

#[derive(Debug, Deserialize)]
struct RestCountry {
    cca2: String,
    name: RestCountryName,
}

#[derive(Debug, Deserialize)]
struct RestCountryName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct CitiesResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<String>>,
}

pub struct HttpDirectorySource {
    client: reqwest::Client,
    countries_url: String,
    cities_url: String,
    universities_url: String,
}

impl HttpDirectorySource {
    pub fn new(config: &DirectoryConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            countries_url: config.countries_url.clone(),
            cities_url: config.cities_url.clone(),
            universities_url: config.universities_url.clone(),
        })
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch_countries(&self) -> Result<Vec<Country>, AppError> {
        log::info!("🌍 Fetching countries from {}", self.countries_url);

        let response = self
            .client
            .get(&self.countries_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch countries: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!("Countries API error: {}", response.status())));
        }

        let countries: Vec<RestCountry> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse countries: {}", e)))?;

        Ok(countries
            .into_iter()
            .map(|c| Country { code: c.cca2, name: c.name.common })
            .collect())
    }

    async fn fetch_cities(&self, country_name: &str) -> Result<Vec<String>, AppError> {
        log::info!("🏙️  Fetching cities for {}", country_name);

        let response = self
            .client
            .post(&self.cities_url)
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "country": country_name }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch cities: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!("Cities API error: {}", response.status())));
        }

        let body: CitiesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse cities: {}", e)))?;

        match body {
            CitiesResponse { error: false, data: Some(cities), .. } => Ok(cities),
            CitiesResponse { msg, .. } => Err(AppError::Upstream(format!(
                "Invalid cities data received: {}",
                msg.unwrap_or_else(|| "no data".to_string())
            ))),
        }
    }

    async fn search_universities(
        &self,
        name: Option<&str>,
        country_name: &str,
    ) -> Result<Vec<RawUniversity>, AppError> {
        let mut url = format!(
            "{}?country={}",
            self.universities_url,
            urlencoding::encode(country_name)
        );
        if let Some(name) = name {
            url.push_str(&format!("&name={}", urlencoding::encode(name)));
        }

        log::info!("🎓 Searching universities: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to search universities: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Universities API error: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse universities: {}", e)))
    }
}

/// Institutions the upstream directory does not list.
struct SupplementalInstitution {
    country: &'static str,
    city_keyword: &'static str,
    university: fn() -> University,
}

const SUPPLEMENTAL_INSTITUTIONS: &[SupplementalInstitution] = &[SupplementalInstitution {
    country: "Israel",
    city_keyword: "karmi",
    university: braude_college,
}];

fn braude_college() -> University {
    University {
        name: "Braude College of Engineering".into(),
        location: "Karmiel, Northern District, Israel".into(),
        website: "https://w3.braude.ac.il/".into(),
        domains: vec!["braude.ac.il".into()],
        country: "Israel".into(),
        alpha_two_code: "IL".into(),
        state_province: "Northern District".into(),
        city: "Karmiel".into(),
        programs: [
            "Software Engineering",
            "Electrical Engineering",
            "Mechanical Engineering",
            "Industrial Engineering",
            "Biomedical Engineering",
            "Computer Science",
        ]
        .iter()
        .map(|p| p.to_string())
        .collect(),
        distance: None,
    }
}

pub const PROGRAMS: &[Program] = &[
    Program { id: "computer-science", name: "Computer Science" },
    Program { id: "business-administration", name: "Business Administration" },
    Program { id: "mechanical-engineering", name: "Mechanical Engineering" },
    Program { id: "medicine", name: "Medicine" },
    Program { id: "electrical-engineering", name: "Electrical Engineering" },
    Program { id: "psychology", name: "Psychology" },
    Program { id: "architecture", name: "Architecture" },
    Program { id: "law", name: "Law" },
    Program { id: "economics", name: "Economics" },
    Program { id: "data-science", name: "Data Science" },
    Program { id: "civil-engineering", name: "Civil Engineering" },
    Program { id: "biology", name: "Biology" },
];

// (country, min, max) in USD per year
const TUITION_BANDS: &[(&str, u32, u32)] = &[
    ("United States", 20_000, 50_000),
    ("United Kingdom", 15_000, 40_000),
    ("Canada", 15_000, 35_000),
    ("Australia", 18_000, 45_000),
    ("Germany", 0, 5_000),
    ("France", 1_000, 15_000),
];
const DEFAULT_TUITION_BAND: (u32, u32) = (5_000, 25_000);

pub fn tuition_band(country: &str) -> TuitionBand {
    let country = country.trim();
    let (min, max) = TUITION_BANDS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, min, max)| (*min, *max))
        .unwrap_or(DEFAULT_TUITION_BAND);

    TuitionBand {
        country: country.to_string(),
        currency: "USD",
        min,
        max,
    }
}

fn city_slug(name: &str) -> String {
    SEPARATORS
        .replace_all(name.trim(), "-")
        .to_lowercase()
}

fn normalize_city(city: &str) -> String {
    APOSTROPHES.replace_all(&city.trim().to_lowercase(), "").into_owned()
}

/// Case-insensitive pattern where spaces and hyphens in the city name are
/// interchangeable ("tel aviv" matches "Tel-Aviv").
fn city_pattern(normalized_city: &str) -> Result<Regex, AppError> {
    let tokens: Vec<String> = SEPARATORS
        .split(normalized_city)
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();

    if tokens.is_empty() {
        return Err(AppError::InvalidRequest("city is required".to_string()));
    }

    RegexBuilder::new(&tokens.join(r"[\s-]*"))
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Internal(format!("Invalid city pattern: {}", e)))
}

fn matches_city(pattern: &Regex, uni: &RawUniversity) -> bool {
    [
        uni.city.as_deref().unwrap_or(""),
        uni.name.as_str(),
        uni.state_province.as_deref().unwrap_or(""),
    ]
    .iter()
    .any(|field| pattern.is_match(field))
}

/// Memoizing front for the public directories. Every lookup is cached for
/// the configured TTL; failures are returned to the caller and never cached.
pub struct DirectoryService {
    source: Arc<dyn DirectorySource>,
    countries: TtlCache<(), Vec<Country>>,
    cities: TtlCache<String, Vec<City>>,
    universities: TtlCache<(String, String), Vec<University>>,
}

impl DirectoryService {
    pub fn new(source: Arc<dyn DirectorySource>, ttl: Duration) -> Self {
        Self {
            source,
            countries: TtlCache::new(ttl),
            cities: TtlCache::new(ttl),
            universities: TtlCache::new(ttl),
        }
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        if let Some(cached) = self.countries.get(&()) {
            log::debug!("📦 Using cached countries ({})", cached.len());
            return Ok(cached);
        }

        let mut countries = self.source.fetch_countries().await?;
        countries.sort_by(|a, b| a.name.cmp(&b.name));

        self.countries.insert((), countries.clone());
        log::debug!("💾 Cached {} countries", countries.len());

        Ok(countries)
    }

    pub async fn country_by_code(&self, code: &str) -> Result<Country, AppError> {
        let code = code.trim();
        self.countries()
            .await?
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| AppError::NotFound(format!("Country '{}' not found", code)))
    }

    pub async fn cities(&self, country_code: &str) -> Result<Vec<City>, AppError> {
        let country = self.country_by_code(country_code).await?;
        let key = country.code.to_uppercase();

        if let Some(cached) = self.cities.get(&key) {
            log::debug!("📦 Using cached cities for {}", key);
            return Ok(cached);
        }

        let mut cities: Vec<City> = self
            .source
            .fetch_cities(&country.name)
            .await?
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| City {
                id: city_slug(&name),
                name: name.trim().to_string(),
                country_code: key.clone(),
            })
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities.dedup_by(|a, b| a.name == b.name);

        self.cities.insert(key, cities.clone());
        Ok(cities)
    }

    pub async fn universities(
        &self,
        country_code: &str,
        city: &str,
    ) -> Result<Vec<University>, AppError> {
        let normalized_city = normalize_city(city);
        let pattern = city_pattern(&normalized_city)?;
        let country = self.country_by_code(country_code).await?;

        let key = (country.code.to_uppercase(), normalized_city.clone());
        if let Some(cached) = self.universities.get(&key) {
            log::debug!("📦 Using cached universities for {:?}", key);
            return Ok(cached);
        }

        let supplemental: Vec<University> = SUPPLEMENTAL_INSTITUTIONS
            .iter()
            .filter(|s| {
                s.country.eq_ignore_ascii_case(&country.name)
                    && normalized_city.contains(s.city_keyword)
            })
            .map(|s| (s.university)())
            .collect();
        if !supplemental.is_empty() {
            self.universities.insert(key, supplemental.clone());
            return Ok(supplemental);
        }

        let mut found = match self
            .source
            .search_universities(Some(&normalized_city), &country.name)
            .await
        {
            Ok(list) => list,
            Err(e) => {
                log::warn!("⚠️  City search failed, falling back to country-only: {}", e);
                Vec::new()
            }
        };
        if found.is_empty() {
            found = self.source.search_universities(None, &country.name).await?;
        }

        let (matching, rest): (Vec<RawUniversity>, Vec<RawUniversity>) =
            found.into_iter().partition(|uni| matches_city(&pattern, uni));

        let result: Vec<University> = if matching.is_empty() {
            rest.into_iter()
                .take(NEARBY_FALLBACK_LIMIT)
                .map(|uni| uni.into_university(Some("nearby")))
                .collect()
        } else {
            matching.into_iter().map(|uni| uni.into_university(None)).collect()
        };

        log::info!(
            "✅ {} universities for {} / {}",
            result.len(),
            country.name,
            normalized_city
        );
        self.universities.insert(key, result.clone());

        Ok(result)
    }
}
