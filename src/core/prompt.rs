//! 提示词渲染

use crate::domain::calendar::{yes_no, DateFacts};

/// 渲染提示词所需的全部槽位
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    /// 检索到的文档片段
    pub passages: &'a [String],
    /// 当前韩国时间 `YYYY-MM-DD HH:MM:SS`
    pub current_time: &'a str,
    /// 用户询问的日期（问题中没有日期时即今天）
    pub ask: &'a DateFacts,
    pub today: &'a DateFacts,
    pub question: &'a str,
}

/// 渲染为发送给模型的完整提示词
pub fn render(ctx: &PromptContext<'_>) -> String {
    let context = ctx.passages.join("\n\n");

    format!(
        "너는 필라테스 운영 전문 어시스턴트이다.
아래 정보를 기반으로 가장 정확한 답변을 제공하라.

[참고문서]
{context}

[현재시간]
{current_time}

[사용자가 물어본 날짜]
{ask_date}

[사용자가 물어본 날짜 요일]
{ask_weekday}

[사용자가 물어본 날짜 공휴일 여부]
{ask_holiday}

[사용자가 물어본 날짜 주말 여부]
{ask_weekend}

[오늘 날짜]
{today}

[오늘 요일]
{today_weekday}

[오늘 공휴일 여부]
{today_holiday}

[오늘 날짜 주말 여부]
{today_weekend}

[질문]
{question}

규칙:
- 주말은 토요일과 일요일이다.
- 사용자가 특정 날짜를 질문한 경우 ask_date 기준으로 운영 규칙을 판단한다.
- 질문 날짜가 없다면 오늘(today)을 기준으로 판단한다.
- 공휴일이면 반드시 공휴일 운영 규정을 우선 적용한다.
- 문서에 없으면 \"문서에 정보가 없습니다\"라고 답한다.
- 답변은 간결하고 정확하게 작성한다.
",
        context = context,
        current_time = ctx.current_time,
        ask_date = ctx.ask.date_string(),
        ask_weekday = ctx.ask.weekday,
        ask_holiday = yes_no(ctx.ask.is_holiday),
        ask_weekend = yes_no(ctx.ask.is_weekend),
        today = ctx.today.date_string(),
        today_weekday = ctx.today.weekday,
        today_holiday = yes_no(ctx.today.is_holiday),
        today_weekend = yes_no(ctx.today.is_weekend),
        question = ctx.question,
    )
}
