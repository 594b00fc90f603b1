//! Encounter details element: date (and time), provider, location
//!
//! Each of the three groups is switched on independently by its own flag, so
//! an element can carry any combination of them. Every present widget gets
//! an error widget next to it.

use chrono::NaiveDateTime;

use crate::config::{ConfigError, ElementParameters, keys};
use crate::domain::{Encounter, Location};
use crate::form::{
    FieldError, Parameters, RenderContext, combine_date_and_time, start_of_day, with_time_of_day,
};
use crate::services::lookup::{self, ProviderOptions};
use crate::services::{FormServices, message_keys};
use crate::widgets::{
    ConversionError, DateWidget, ErrorWidget, LocationWidget, PersonWidget, TimeWidget, Widget,
};

use super::FormElement;

/// Literal placed between the date and time controls
const DATE_TIME_SEPARATOR: &str = "&nbsp;";

/// A widget and the error widget shown beside it
#[derive(Debug)]
struct WidgetGroup<W> {
    widget: W,
    error: ErrorWidget,
}

impl<W: Widget> WidgetGroup<W> {
    fn register(widget: W, ctx: &mut RenderContext) -> Result<Self, ConfigError> {
        let error = ErrorWidget::new();
        ctx.register_widget(widget.id())?;
        ctx.register_error_widget(widget.id(), error.id())?;
        Ok(WidgetGroup { widget, error })
    }

    fn render_into(&self, ctx: &RenderContext, html: &mut String) {
        html.push_str(&self.widget.render(ctx));
        if !ctx.mode().is_view() {
            html.push_str(&self.error.render(ctx));
        }
    }

    fn error_field(&self, ctx: &RenderContext) -> String {
        ctx.field_name(self.error.id()).unwrap_or_default().to_string()
    }

    /// Submitted value, or the message key explaining why there is none
    fn require(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<W::Value, &'static str> {
        match self.widget.value(ctx, params) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(message_keys::REQUIRED),
            Err(e) => Err(e.key),
        }
    }
}

/// Date widget plus the optional time widget that refines it
#[derive(Debug)]
struct DateGroup {
    date: WidgetGroup<DateWidget>,
    time: Option<WidgetGroup<TimeWidget>>,
}

impl DateGroup {
    /// The submitted encounter timestamp
    ///
    /// With a time widget both parts must be present; date alone means
    /// midnight.
    fn timestamp(&self, ctx: &RenderContext, params: &dyn Parameters) -> Result<Option<NaiveDateTime>, ConversionError> {
        let date = self.date.widget.value(ctx, params)?;
        match &self.time {
            None => Ok(date.map(start_of_day)),
            Some(time) => {
                let time = time.widget.value(ctx, params)?;
                Ok(combine_date_and_time(date, time))
            }
        }
    }

    fn check(&self, ctx: &RenderContext, params: &dyn Parameters, now: NaiveDateTime) -> Result<(), &'static str> {
        let timestamp = self
            .timestamp(ctx, params)
            .map_err(|e| e.key)?
            .ok_or(message_keys::REQUIRED)?;

        if timestamp > now {
            return Err(message_keys::CANNOT_BE_IN_FUTURE);
        }
        Ok(())
    }
}

/// Holds the widgets for an encounter's date, provider and location
///
/// Renders them, validates a submission against them and writes accepted
/// values onto the session's encounter.
#[derive(Debug)]
pub struct EncounterDetailElement {
    date: Option<DateGroup>,
    provider: Option<WidgetGroup<PersonWidget>>,
    location: Option<WidgetGroup<LocationWidget>>,
}

impl EncounterDetailElement {
    /// Build the widgets the parameters ask for and register them with `ctx`
    ///
    /// Unresolvable explicit identifiers, roles or provider defaults abort
    /// construction.
    pub fn new(
        ctx: &mut RenderContext,
        params: &ElementParameters,
        services: &FormServices<'_>,
    ) -> Result<Self, ConfigError> {
        let date = if params.flag(keys::DATE) {
            Some(Self::build_date(ctx, params)?)
        } else {
            None
        };

        let provider = if params.flag(keys::PROVIDER) {
            Some(Self::build_provider(ctx, params, services)?)
        } else {
            None
        };

        let location = if params.flag(keys::LOCATION) {
            Some(Self::build_location(ctx, params, services)?)
        } else {
            None
        };

        log::debug!(
            "Encounter details element built: date={}, time={}, provider={}, location={}",
            date.is_some(),
            date.as_ref().is_some_and(|d| d.time.is_some()),
            provider.is_some(),
            location.is_some()
        );

        Ok(EncounterDetailElement { date, provider, location })
    }

    fn build_date(ctx: &mut RenderContext, params: &ElementParameters) -> Result<DateGroup, ConfigError> {
        let existing = ctx.existing_encounter().map(|e| e.encounter_datetime);
        let initial = lookup::resolve_initial(existing, || params.timestamp(keys::DEFAULT_DATE))?;

        let mut date_widget = DateWidget::new();
        date_widget.set_initial_value(initial.map(|ts| ts.date()));
        let date = WidgetGroup::register(date_widget, ctx)?;

        let time = if params.flag(keys::SHOW_TIME) {
            let mut time_widget = TimeWidget::new();
            time_widget.set_initial_value(initial.map(|ts| ts.time()));
            Some(WidgetGroup::register(time_widget, ctx)?)
        } else {
            None
        };

        Ok(DateGroup { date, time })
    }

    fn build_provider(
        ctx: &mut RenderContext,
        params: &ElementParameters,
        services: &FormServices<'_>,
    ) -> Result<WidgetGroup<PersonWidget>, ConfigError> {
        let persons = params.list(keys::PERSONS);
        let ProviderOptions { mut people, source } = lookup::resolve_provider_options(
            services.lookup,
            persons.as_deref(),
            params.non_blank(keys::ROLE),
        )?;

        let existing = ctx.existing_encounter().map(|e| e.provider.clone());
        let editing = existing.is_some();
        let initial = lookup::resolve_initial(existing, || {
            params
                .non_blank(keys::DEFAULT)
                .map(|value| lookup::resolve_default_provider(services.lookup, value))
                .transpose()
        })?;

        // keep an edited encounter's provider selectable even if the list
        // would not otherwise offer it
        if editing {
            if let Some(current) = &initial {
                if !people.iter().any(|p| p.id == current.id) {
                    people.push(current.clone());
                }
            }
        }

        if source.is_sorted() {
            lookup::sort_by_display_name(&mut people);
        }

        let mut widget = PersonWidget::new();
        widget.set_options(people);
        widget.set_initial_value(initial);
        widget.set_placeholder(services.messages.translate(message_keys::CHOOSE));
        WidgetGroup::register(widget, ctx)
    }

    fn build_location(
        ctx: &mut RenderContext,
        params: &ElementParameters,
        services: &FormServices<'_>,
    ) -> Result<WidgetGroup<LocationWidget>, ConfigError> {
        let order = params.list(keys::ORDER);
        let mut options = lookup::resolve_location_options(services.lookup, order.as_deref())?;

        let existing = ctx.existing_encounter().map(|e| e.location.clone());
        let editing = existing.is_some();
        let initial = lookup::resolve_initial(existing, || -> Result<Option<Location>, ConfigError> {
            let Some(identifier) = params.non_blank(keys::DEFAULT) else {
                return Ok(None);
            };
            let found = services.lookup.find_location(identifier);
            if found.is_none() {
                log::warn!("Default location '{}' not found, leaving location unset", identifier);
            }
            Ok(found)
        })?;

        if editing {
            if let Some(current) = &initial {
                if !options.iter().any(|l| l.id == current.id) {
                    options.push(current.clone());
                }
            }
        }

        let mut widget = LocationWidget::new();
        widget.set_options(options);
        widget.set_initial_value(initial);
        widget.set_placeholder(services.messages.translate(message_keys::CHOOSE));
        WidgetGroup::register(widget, ctx)
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    pub fn has_time(&self) -> bool {
        self.date.as_ref().is_some_and(|d| d.time.is_some())
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn date_widget(&self) -> Option<&DateWidget> {
        self.date.as_ref().map(|d| &d.date.widget)
    }

    pub fn time_widget(&self) -> Option<&TimeWidget> {
        self.date.as_ref().and_then(|d| d.time.as_ref()).map(|t| &t.widget)
    }

    pub fn provider_widget(&self) -> Option<&PersonWidget> {
        self.provider.as_ref().map(|g| &g.widget)
    }

    pub fn location_widget(&self) -> Option<&LocationWidget> {
        self.location.as_ref().map(|g| &g.widget)
    }

    /// (label, field name) of each input, in render order
    pub fn fields<'c>(&self, ctx: &'c RenderContext) -> Vec<(&'static str, &'c str)> {
        let mut fields = Vec::new();
        let mut push = |label: &'static str, id| {
            if let Some(name) = ctx.field_name(id) {
                fields.push((label, name));
            }
        };

        if let Some(group) = &self.date {
            push("date", group.date.widget.id());
            if let Some(time) = &group.time {
                push("time", time.widget.id());
            }
        }
        if let Some(group) = &self.provider {
            push("provider", group.widget.id());
        }
        if let Some(group) = &self.location {
            push("location", group.widget.id());
        }
        fields
    }
}

impl FormElement for EncounterDetailElement {
    fn generate_html(&self, ctx: &RenderContext) -> String {
        let mut html = String::new();

        if let Some(group) = &self.date {
            group.date.render_into(ctx, &mut html);
            if let Some(time) = &group.time {
                html.push_str(DATE_TIME_SEPARATOR);
                time.render_into(ctx, &mut html);
            }
        }
        if let Some(group) = &self.provider {
            group.render_into(ctx, &mut html);
        }
        if let Some(group) = &self.location {
            group.render_into(ctx, &mut html);
        }

        html
    }

    fn validate(
        &self,
        ctx: &RenderContext,
        params: &dyn Parameters,
        services: &FormServices<'_>,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut fail = |field: String, key: &str| {
            errors.push(FieldError::new(field, services.messages.translate(key)));
        };

        if let Some(group) = &self.date {
            if let Err(key) = group.check(ctx, params, services.clock.now()) {
                fail(group.date.error_field(ctx), key);
            }
        }

        if let Some(group) = &self.provider {
            if let Err(key) = group.require(ctx, params) {
                fail(group.error_field(ctx), key);
            }
        }

        if let Some(group) = &self.location {
            if let Err(key) = group.require(ctx, params) {
                fail(group.error_field(ctx), key);
            }
        }

        errors
    }

    fn commit(
        &self,
        ctx: &RenderContext,
        encounter: &mut Encounter,
        params: &dyn Parameters,
    ) -> Result<(), ConversionError> {
        if let Some(group) = &self.date {
            let date = group.date.widget.value(ctx, params)?;
            encounter.encounter_datetime = date.map(start_of_day);

            if let Some(time_group) = &group.time {
                if let (Some(timestamp), Some(time)) =
                    (encounter.encounter_datetime, time_group.widget.value(ctx, params)?)
                {
                    encounter.encounter_datetime = Some(with_time_of_day(timestamp, time));
                }
            }
        }

        if let Some(group) = &self.provider {
            encounter.provider = group.widget.value(ctx, params)?;
        }

        if let Some(group) = &self.location {
            encounter.location = group.widget.value(ctx, params)?;
        }

        log::info!(
            "Committed encounter details onto encounter {}: datetime={:?}, provider={:?}, location={:?}",
            encounter.uuid,
            encounter.encounter_datetime,
            encounter.provider.as_ref().map(|p| p.id),
            encounter.location.as_ref().map(|l| l.id)
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;
    use crate::form::{Mode, Submission};
    use crate::test_support::{Fixture, ts};

    fn build(fixture: &Fixture, ctx: &mut RenderContext, params: &ElementParameters) -> EncounterDetailElement {
        EncounterDetailElement::new(ctx, params, &fixture.services()).unwrap()
    }

    fn every_group() -> ElementParameters {
        ElementParameters::new()
            .with(keys::DATE, true)
            .with(keys::SHOW_TIME, "true")
            .with(keys::PROVIDER, true)
            .with(keys::LOCATION, true)
    }

    fn option_ids(widget: &PersonWidget) -> Vec<i64> {
        widget.options().iter().map(|p| p.id).collect()
    }

    fn existing_encounter() -> Encounter {
        Encounter {
            id: Some(100),
            encounter_datetime: Some(ts(2024, 3, 10, 9, 45)),
            provider: Some(Person::new(5, "Zoe", "Visitor")),
            location: Some(Location::new(7, "Ward 7")),
            ..Encounter::new()
        }
    }

    #[test]
    fn test_no_groups_renders_and_validates_nothing() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::DATE, false)
            .with(keys::PROVIDER, false)
            .with(keys::LOCATION, false);
        let element = build(&fixture, &mut ctx, &params);

        assert_eq!(element.generate_html(&ctx), "");
        assert!(element.validate(&ctx, &Submission::new(), &fixture.services()).is_empty());
        assert_eq!(ctx.registered_count(), 0);
    }

    #[test]
    fn test_field_names_follow_registration_order() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &every_group());

        assert_eq!(
            element.fields(&ctx),
            vec![("date", "w1"), ("time", "w3"), ("provider", "w5"), ("location", "w7")]
        );
        assert_eq!(ctx.registered_count(), 8);
    }

    #[test]
    fn test_date_only_missing_date_is_one_required_error() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &ElementParameters::new().with(keys::DATE, true));

        let errors = element.validate(&ctx, &Submission::new(), &fixture.services());

        let date_id = element.date_widget().unwrap().id();
        assert_eq!(errors, vec![FieldError::new(ctx.error_field_name(date_id).unwrap(), "Required")]);
        assert_eq!(errors[0].field, "w2");
    }

    #[test]
    fn test_date_and_time_combine_on_commit() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::DATE, true)
            .with(keys::SHOW_TIME, "true");
        let element = build(&fixture, &mut ctx, &params);
        let submission = Submission::new().with("w1", "2024-01-05").with("w3", "14:30");

        assert!(element.validate(&ctx, &submission, &fixture.services()).is_empty());

        let mut encounter = Encounter::new();
        element.commit(&ctx, &mut encounter, &submission).unwrap();
        assert_eq!(encounter.encounter_datetime, Some(ts(2024, 1, 5, 14, 30)));
    }

    #[test]
    fn test_date_without_time_commits_midnight() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &ElementParameters::new().with(keys::DATE, true));
        let submission = Submission::new().with("w1", "2024-01-05");

        let mut encounter = Encounter::new();
        element.commit(&ctx, &mut encounter, &submission).unwrap();
        assert_eq!(encounter.encounter_datetime, Some(ts(2024, 1, 5, 0, 0)));
    }

    #[test]
    fn test_blank_time_makes_date_group_required() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::DATE, true)
            .with(keys::SHOW_TIME, "true");
        let element = build(&fixture, &mut ctx, &params);
        let submission = Submission::new().with("w1", "2024-01-05").with("w3", "");

        let errors = element.validate(&ctx, &submission, &fixture.services());
        assert_eq!(errors, vec![FieldError::new("w2", "Required")]);
    }

    #[test]
    fn test_malformed_time_is_reported_on_the_date_field() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::DATE, true)
            .with(keys::SHOW_TIME, "true");
        let element = build(&fixture, &mut ctx, &params);
        let submission = Submission::new().with("w1", "2024-01-05").with("w3", "quarter past");

        let errors = element.validate(&ctx, &submission, &fixture.services());
        assert_eq!(errors, vec![FieldError::new("w2", "Invalid time")]);
    }

    #[test]
    fn test_future_date_is_rejected_alongside_other_failures() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &every_group());

        // clock is 2024-06-01 12:00
        let submission = Submission::new()
            .with("w1", "2024-06-01")
            .with("w3", "12:01")
            .with("w7", "3");

        let errors = element.validate(&ctx, &submission, &fixture.services());
        assert_eq!(
            errors,
            vec![
                FieldError::new("w2", "Cannot be in the future"),
                FieldError::new("w6", "Required"),
            ]
        );
    }

    #[test]
    fn test_future_date_without_time() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &ElementParameters::new().with(keys::DATE, true));

        let tomorrow = Submission::new().with("w1", "2024-06-02");
        assert_eq!(
            element.validate(&ctx, &tomorrow, &fixture.services()),
            vec![FieldError::new("w2", "Cannot be in the future")]
        );

        let today = Submission::new().with("w1", "2024-06-01");
        assert!(element.validate(&ctx, &today, &fixture.services()).is_empty());
    }

    #[test]
    fn test_explicit_persons_win_over_role() {
        let fixture = Fixture::new();
        let params = ElementParameters::new()
            .with(keys::PROVIDER, true)
            .with(keys::PERSONS, "3,1")
            .with(keys::ROLE, "Nurse");

        // same outcome every time the element is rebuilt
        for _ in 0..2 {
            let mut ctx = RenderContext::new(Mode::Enter);
            let element = build(&fixture, &mut ctx, &params);
            assert_eq!(option_ids(element.provider_widget().unwrap()), vec![3, 1]);
        }
    }

    #[test]
    fn test_role_members_are_sorted_by_name() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &ElementParameters::new().with(keys::PROVIDER, true));

        // Ann Baker before John Doe
        assert_eq!(option_ids(element.provider_widget().unwrap()), vec![2, 1]);

        let html = element.generate_html(&ctx);
        assert!(html.starts_with("<select name=\"w1\" id=\"w1\">\n<option value=\"\">Choose...</option>"));
        assert!(html.contains("<option value=\"2\">Ann Baker</option>"));
    }

    #[test]
    fn test_provider_configuration_errors() {
        let fixture = Fixture::new();
        let cases = [
            (
                ElementParameters::new().with(keys::PROVIDER, true).with(keys::PERSONS, "1,404"),
                ConfigError::PersonNotFound("404".into()),
            ),
            (
                ElementParameters::new().with(keys::PROVIDER, true).with(keys::ROLE, "Surgeon"),
                ConfigError::RoleNotFound("Surgeon".into()),
            ),
            (
                ElementParameters::new().with(keys::PROVIDER, true).with(keys::DEFAULT, "ghost"),
                ConfigError::InvalidDefaultProvider("ghost".into()),
            ),
        ];

        for (params, expected) in cases {
            let mut ctx = RenderContext::new(Mode::Enter);
            let err = EncounterDetailElement::new(&mut ctx, &params, &fixture.services()).unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[test]
    fn test_provider_default_current_user() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::PROVIDER, true)
            .with(keys::DEFAULT, "currentuser");
        let element = build(&fixture, &mut ctx, &params);

        assert_eq!(element.provider_widget().unwrap().initial_value().map(|p| p.id), Some(1));
        assert!(element.generate_html(&ctx).contains("<option selected=\"true\" value=\"1\">John Doe</option>"));
    }

    #[test]
    fn test_existing_provider_outside_the_list_is_preserved() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::for_encounter(Mode::Edit, existing_encounter());
        let params = ElementParameters::new()
            .with(keys::PROVIDER, true)
            .with(keys::DEFAULT, "currentuser");
        let element = build(&fixture, &mut ctx, &params);

        let widget = element.provider_widget().unwrap();
        assert_eq!(option_ids(widget), vec![2, 1, 5]);
        assert_eq!(widget.initial_value().map(|p| p.id), Some(5));
        assert!(element.generate_html(&ctx).contains("<option selected=\"true\" value=\"5\">Zoe Visitor</option>"));

        // submitting the untouched form keeps the provider
        let submission = Submission::new().with("w1", "5");
        assert!(element.validate(&ctx, &submission, &fixture.services()).is_empty());
        let mut encounter = existing_encounter();
        element.commit(&ctx, &mut encounter, &submission).unwrap();
        assert_eq!(encounter.provider.map(|p| p.id), Some(5));
    }

    #[test]
    fn test_invalid_default_is_ignored_when_editing() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::for_encounter(Mode::Edit, existing_encounter());
        let params = ElementParameters::new()
            .with(keys::PROVIDER, true)
            .with(keys::DEFAULT, "ghost");

        assert!(EncounterDetailElement::new(&mut ctx, &params, &fixture.services()).is_ok());
    }

    #[test]
    fn test_location_default_and_existing_record() {
        let fixture = Fixture::new();
        let params = ElementParameters::new()
            .with(keys::LOCATION, true)
            .with(keys::DEFAULT, "3");

        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &params);
        assert!(element
            .generate_html(&ctx)
            .contains("<option selected=\"true\" value=\"3\">Outpatient Clinic</option>"));

        let mut ctx = RenderContext::for_encounter(Mode::Edit, existing_encounter());
        let element = build(&fixture, &mut ctx, &params);
        let html = element.generate_html(&ctx);
        assert!(html.contains("<option selected=\"true\" value=\"7\">Ward 7</option>"));
        assert!(!html.contains("selected=\"true\" value=\"3\""));
    }

    #[test]
    fn test_unknown_location_default_leaves_location_unset() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::LOCATION, true)
            .with(keys::DEFAULT, "Basement");
        let element = build(&fixture, &mut ctx, &params);

        assert!(element.location_widget().unwrap().initial_value().is_none());
    }

    #[test]
    fn test_location_order_is_kept_and_validated() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::LOCATION, true)
            .with(keys::ORDER, "9,3");
        let element = build(&fixture, &mut ctx, &params);

        let ids: Vec<i64> = element.location_widget().unwrap().options().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![9, 3]);

        let outside = Submission::new().with("w1", "7");
        assert_eq!(
            element.validate(&ctx, &outside, &fixture.services()),
            vec![FieldError::new("w2", "Not one of the available choices")]
        );

        let mut ctx = RenderContext::new(Mode::Enter);
        let bad = ElementParameters::new()
            .with(keys::LOCATION, true)
            .with(keys::ORDER, "9,Basement");
        assert_eq!(
            EncounterDetailElement::new(&mut ctx, &bad, &fixture.services()).unwrap_err(),
            ConfigError::LocationNotFound("Basement".into())
        );
    }

    #[test]
    fn test_initial_date_from_default_or_existing_record() {
        let fixture = Fixture::new();
        let params = every_group().with(keys::DEFAULT_DATE, ts(2024, 2, 1, 8, 15));

        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &params);
        assert_eq!(element.date_widget().unwrap().initial_value(), Some(ts(2024, 2, 1, 0, 0).date()));
        assert_eq!(element.time_widget().unwrap().initial_value(), Some(ts(2024, 2, 1, 8, 15).time()));

        let mut ctx = RenderContext::for_encounter(Mode::Edit, existing_encounter());
        let element = build(&fixture, &mut ctx, &params);
        assert_eq!(element.date_widget().unwrap().initial_value(), Some(ts(2024, 3, 10, 0, 0).date()));
        assert_eq!(element.time_widget().unwrap().initial_value(), Some(ts(2024, 3, 10, 9, 45).time()));
    }

    #[test]
    fn test_render_order_and_separator() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let params = ElementParameters::new()
            .with(keys::DATE, true)
            .with(keys::SHOW_TIME, "true");
        let element = build(&fixture, &mut ctx, &params);

        assert_eq!(
            element.generate_html(&ctx),
            "<input type=\"date\" id=\"w1\" name=\"w1\" size=\"10\" value=\"\"/>\
             <span class=\"error\" style=\"display: none\" id=\"w2\"></span>\
             &nbsp;\
             <input type=\"time\" id=\"w3\" name=\"w3\" value=\"\"/>\
             <span class=\"error\" style=\"display: none\" id=\"w4\"></span>"
        );
    }

    #[test]
    fn test_view_mode_shows_values_without_error_widgets() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::for_encounter(Mode::View, existing_encounter());
        let element = build(&fixture, &mut ctx, &every_group());

        assert_eq!(
            element.generate_html(&ctx),
            "<span class=\"value\">10/03/2024</span>\
             &nbsp;\
             <span class=\"value\">09:45</span>\
             <span class=\"value\">Zoe Visitor</span>\
             <span class=\"value\">Ward 7</span>"
        );
    }

    #[test]
    fn test_commit_then_rerender_round_trip() {
        let fixture = Fixture::new();
        let mut ctx = RenderContext::new(Mode::Enter);
        let element = build(&fixture, &mut ctx, &every_group());
        let submission = Submission::new()
            .with("w1", "2024-01-05")
            .with("w3", "14:30")
            .with("w5", "2")
            .with("w7", "9");

        assert!(element.validate(&ctx, &submission, &fixture.services()).is_empty());
        let mut encounter = Encounter::new();
        element.commit(&ctx, &mut encounter, &submission).unwrap();

        let mut edit_ctx = RenderContext::for_encounter(Mode::Edit, encounter.clone());
        let reloaded = build(&fixture, &mut edit_ctx, &every_group());
        let html = reloaded.generate_html(&edit_ctx);

        assert!(html.contains("value=\"2024-01-05\""));
        assert!(html.contains("value=\"14:30\""));
        assert!(html.contains("<option selected=\"true\" value=\"2\">Ann Baker</option>"));
        assert!(html.contains("<option selected=\"true\" value=\"9\">Emergency</option>"));
        assert!(reloaded.validate(&edit_ctx, &submission, &fixture.services()).is_empty());

        let mut again = encounter.clone();
        reloaded.commit(&edit_ctx, &mut again, &submission).unwrap();
        assert_eq!(again, encounter);
    }
}
