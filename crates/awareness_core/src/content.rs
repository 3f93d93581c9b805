//! Statically authored landing page and articles content.

use crate::model::article::Article;
use crate::model::issue::{IssueSummary, Severity};
use crate::model::question::Question;
use chrono::NaiveDate;

/// Issue cards shown on the landing page.
pub fn sample_issues() -> Vec<IssueSummary> {
    vec![
        IssueSummary::new(
            "Бездомність у великих містах",
            "Зростання кількості людей без постійного житла є серйозною проблемою, що потребує \
             комплексного підходу до вирішення. Включає в себе не лише забезпечення тимчасовим \
             житлом, але й програми реінтеграції в суспільство.",
            "Соціальна політика",
            Severity::High,
        )
        .with_image("/api/placeholder/400/200"),
        IssueSummary::new(
            "Цифрова нерівність",
            "Відсутність доступу до інтернету та цифрових технологій створює додаткові бар'єри \
             для освіти та працевлаштування.",
            "Технології та освіта",
            Severity::Medium,
        ),
    ]
}

/// Questions of the landing page quiz.
pub fn quiz_questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            prompt: "Яка найбільша причина бездомності у великих містах?".to_string(),
            options: owned(&[
                "Недостатня кількість доступного житла",
                "Особисті проблеми людей",
                "Відсутність роботи",
                "Погана погода",
            ]),
            correct_answer: 0,
            related_issue: IssueSummary::new(
                "Бездомність у великих містах",
                "Проблема доступного житла впливає на мільйони людей",
                "Соціальна політика",
                Severity::High,
            ),
        },
        Question {
            id: "q2".to_string(),
            prompt: "Що таке цифрова нерівність?".to_string(),
            options: owned(&[
                "Різниця в швидкості інтернету",
                "Нерівний доступ до цифрових технологій",
                "Різні ціни на комп'ютери",
                "Складність використання програм",
            ]),
            correct_answer: 1,
            related_issue: IssueSummary::new(
                "Цифрова нерівність",
                "Відсутність рівного доступу до технологій",
                "Технології та освіта",
                Severity::Medium,
            ),
        },
    ]
}

/// Catalog served by the mock article source.
pub fn mock_articles() -> Vec<Article> {
    vec![
        article(
            "1",
            "Розуміння соціальної нерівності в Україні",
            "Аналіз причин та наслідків соціальної нерівності в сучасному українському суспільстві.",
            "Детальний аналіз соціальної нерівності...",
            "Соціальна політика",
            "Іван Петренко",
            (2025, 5, 15),
            8,
        ),
        article(
            "2",
            "Цифрова трансформація та її вплив на суспільство",
            "Як цифрові технології змінюють наше повсякденне життя та створюють нові виклики.",
            "Цифрова революція приносить як можливості, так і ризики...",
            "Технології",
            "Марія Коваленко",
            (2025, 5, 10),
            6,
        ),
        article(
            "3",
            "Екологічна свідомість молоді",
            "Дослідження екологічних настроїв серед української молоді та їх готовності до змін.",
            "Молоде покоління все більше усвідомлює екологічні проблеми...",
            "Екологія",
            "Олександр Сидоренко",
            (2025, 5, 8),
            5,
        ),
    ]
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    author: &str,
    (year, month, day): (i32, u32, u32),
    read_time: u32,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        author: author.to_string(),
        publish_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        read_time,
    }
}
