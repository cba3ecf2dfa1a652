use crate::models::{
    EduCompany, EduProgram, HiringCount, Job, JobDutyTag, JobInfo, JobIntro, JobWorknet, NcsJob,
    Question, Tag, TagClass, TagJob, WorkCompany, WorkPosition,
};
use crate::services::reference::Relation;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};

/// Column value bound into an INSERT
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    OptText(Option<String>),
    Int(i64),
    OptInt(Option<i64>),
}

impl Value {
    fn bind<'q>(self, query: Query<'q, Sqlite, SqliteArguments<'q>>) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Value::Text(v) => query.bind(v),
            Value::OptText(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::OptInt(v) => query.bind(v),
        }
    }
}

/// Mapping between a reference-data type and its SQLite table
///
/// Column names are the CSV column names.
pub trait TableRow: Sized {
    const RELATION: Relation;
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<Value>;
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {} ORDER BY rowid",
            quoted_columns(Self::COLUMNS),
            Self::RELATION.table()
        )
    }

    fn insert_sql() -> String {
        let placeholders = vec!["?"; Self::COLUMNS.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::RELATION.table(),
            quoted_columns(Self::COLUMNS),
            placeholders
        )
    }

    fn bind_into<'q>(&self, sql: &'q str) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        self.values()
            .into_iter()
            .fold(sqlx::query(sql), |query, value| value.bind(query))
    }
}

fn quoted_columns(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TableRow for Question {
    const RELATION: Relation = Relation::Question;
    const COLUMNS: &'static [&'static str] = &["id_question", "id_tag_class", "name_question"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.tag_class_id.clone()),
            Value::Text(self.prompt.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_question")?,
            tag_class_id: row.try_get("id_tag_class")?,
            prompt: row.try_get("name_question")?,
        })
    }
}

impl TableRow for TagClass {
    const RELATION: Relation = Relation::TagClass;
    const COLUMNS: &'static [&'static str] = &["id_tag_class", "name_tag_class"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.id.clone()), Value::Text(self.name.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_tag_class")?,
            name: row.try_get("name_tag_class")?,
        })
    }
}

impl TableRow for Tag {
    const RELATION: Relation = Relation::Tag;
    const COLUMNS: &'static [&'static str] = &["id_tag_class", "id_tag", "name_tag"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.tag_class_id.clone()),
            Value::Text(self.id.clone()),
            Value::Text(self.label.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tag_class_id: row.try_get("id_tag_class")?,
            id: row.try_get("id_tag")?,
            label: row.try_get("name_tag")?,
        })
    }
}

impl TableRow for TagJob {
    const RELATION: Relation = Relation::TagToJobs;
    const COLUMNS: &'static [&'static str] = &["id_tag", "id_jobs"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.tag_id.clone()), Value::Text(self.job_id.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tag_id: row.try_get("id_tag")?,
            job_id: row.try_get("id_jobs")?,
        })
    }
}

impl TableRow for Job {
    const RELATION: Relation = Relation::Jobs;
    const COLUMNS: &'static [&'static str] = &["id_jobs", "name_jobs"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.id.clone()), Value::Text(self.name.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_jobs")?,
            name: row.try_get("name_jobs")?,
        })
    }
}

impl TableRow for NcsJob {
    const RELATION: Relation = Relation::NcsToJobs;
    const COLUMNS: &'static [&'static str] = &["id_jobs", "ncs_code"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.job_id.clone()), Value::Text(self.ncs_code.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            job_id: row.try_get("id_jobs")?,
            ncs_code: row.try_get("ncs_code")?,
        })
    }
}

impl TableRow for EduCompany {
    const RELATION: Relation = Relation::EduCompany;
    const COLUMNS: &'static [&'static str] = &["id_edu_company", "name_edu_company", "address"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Int(self.id),
            Value::Text(self.name.clone()),
            Value::OptText(self.address.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_edu_company")?,
            name: row.try_get("name_edu_company")?,
            address: row.try_get("address")?,
        })
    }
}

impl TableRow for EduProgram {
    const RELATION: Relation = Relation::EduProgram;
    const COLUMNS: &'static [&'static str] = &[
        "id_edu_program",
        "id_edu_company",
        "name_edu_program",
        "date_start",
        "date_end",
        "cost",
        "oopc",
        "link",
        "online_status",
        "employment_status",
        "ncs_code",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Int(self.id),
            Value::Int(self.company_id),
            Value::Text(self.name.clone()),
            Value::OptInt(self.date_start),
            Value::OptInt(self.date_end),
            Value::Int(self.cost),
            Value::Int(self.oopc),
            Value::Text(self.link.clone()),
            Value::Text(self.online_status.clone()),
            Value::Text(self.employment_status.clone()),
            Value::Text(self.ncs_code.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_edu_program")?,
            company_id: row.try_get("id_edu_company")?,
            name: row.try_get("name_edu_program")?,
            date_start: row.try_get("date_start")?,
            date_end: row.try_get("date_end")?,
            cost: row.try_get("cost")?,
            oopc: row.try_get("oopc")?,
            link: row.try_get("link")?,
            online_status: row.try_get("online_status")?,
            employment_status: row.try_get("employment_status")?,
            ncs_code: row.try_get("ncs_code")?,
        })
    }
}

impl TableRow for JobWorknet {
    const RELATION: Relation = Relation::JobsToWorknet;
    const COLUMNS: &'static [&'static str] = &["id_jobs", "work_code"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.job_id.clone()), Value::Int(self.work_code)]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            job_id: row.try_get("id_jobs")?,
            work_code: row.try_get("work_code")?,
        })
    }
}

impl TableRow for WorkCompany {
    const RELATION: Relation = Relation::WorknetCompany;
    const COLUMNS: &'static [&'static str] = &["id_work_company", "work_company"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Int(self.id), Value::Text(self.name.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_work_company")?,
            name: row.try_get("work_company")?,
        })
    }
}

impl TableRow for WorkPosition {
    const RELATION: Relation = Relation::WorknetPositions;
    const COLUMNS: &'static [&'static str] = &[
        "id_work_positions",
        "id_work_company",
        "work_code",
        "recruit",
        "job_describ_1",
        "job_describ_2",
        "condition",
        "date",
        "link",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Int(self.id),
            Value::Int(self.company_id),
            Value::Int(self.work_code),
            Value::Text(self.recruit.clone()),
            Value::Text(self.description_1.clone()),
            Value::Text(self.description_2.clone()),
            Value::Text(self.condition.clone()),
            Value::Text(self.date.clone()),
            Value::Text(self.link.clone()),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id_work_positions")?,
            company_id: row.try_get("id_work_company")?,
            work_code: row.try_get("work_code")?,
            recruit: row.try_get("recruit")?,
            description_1: row.try_get("job_describ_1")?,
            description_2: row.try_get("job_describ_2")?,
            condition: row.try_get("condition")?,
            date: row.try_get("date")?,
            link: row.try_get("link")?,
        })
    }
}

impl TableRow for JobInfo {
    const RELATION: Relation = Relation::JobInfo;
    const COLUMNS: &'static [&'static str] = &["직무", "중분류_1"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.duty.clone()), Value::Text(self.category.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            duty: row.try_get("직무")?,
            category: row.try_get("중분류_1")?,
        })
    }
}

impl TableRow for JobDutyTag {
    const RELATION: Relation = Relation::JobTag;
    const COLUMNS: &'static [&'static str] = &["직무"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.duty.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self { duty: row.try_get("직무")? })
    }
}

impl TableRow for JobIntro {
    const RELATION: Relation = Relation::JobIntro;
    const COLUMNS: &'static [&'static str] = &["NCS 기준", "NCS 직무분류코드"];

    fn values(&self) -> Vec<Value> {
        vec![Value::Text(self.duty.clone()), Value::OptText(self.ncs_code.clone())]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            duty: row.try_get("NCS 기준")?,
            ncs_code: row.try_get("NCS 직무분류코드")?,
        })
    }
}

impl TableRow for HiringCount {
    const RELATION: Relation = Relation::HiringTrends;
    const COLUMNS: &'static [&'static str] = &["occupation", "year", "openings"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.occupation.clone()),
            Value::Int(i64::from(self.year)),
            Value::Int(self.openings),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            occupation: row.try_get("occupation")?,
            year: row.try_get("year")?,
            openings: row.try_get("openings")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_uses_csv_columns() {
        assert_eq!(
            Tag::select_sql(),
            "SELECT \"id_tag_class\", \"id_tag\", \"name_tag\" FROM tag ORDER BY rowid"
        );
        assert_eq!(
            TagJob::insert_sql(),
            "INSERT INTO tag_to_jobs (\"id_tag\", \"id_jobs\") VALUES (?, ?)"
        );
    }

    #[test]
    fn test_korean_columns_are_quoted() {
        assert_eq!(
            JobIntro::insert_sql(),
            "INSERT INTO job_int (\"NCS 기준\", \"NCS 직무분류코드\") VALUES (?, ?)"
        );
    }

    #[test]
    fn test_values_match_columns() {
        let position = WorkPosition {
            id: 1,
            company_id: 2,
            work_code: 3,
            recruit: "r".into(),
            description_1: "a".into(),
            description_2: "b".into(),
            condition: "c".into(),
            date: "d".into(),
            link: "l".into(),
        };
        assert_eq!(position.values().len(), WorkPosition::COLUMNS.len());
        assert_eq!(position.values()[2], Value::Int(3));
    }
}
