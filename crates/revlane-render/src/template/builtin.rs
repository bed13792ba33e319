//! Built-in templates for the revenue-sharing resources.
//!
//! These cover every schema key the views use, so a session renders
//! something sensible without a template directory. Any of them can be
//! overridden by a container or an inline template with the same name.
//!
//! Conventions used below:
//!
//! - `data-action` names the drill-down a click on the element triggers.
//! - `*_item` templates render the elements of the matching array key.
//!   List templates carry no `content` slot, so items land directly in the `<ul>`.
//! - `use_template` routes a field to a shared template (`period`, `money`, `ref`).

pub const BUILTIN_TEMPLATES: &str = r#"<templates>
  <div name="plan_short_summary_template" class="tmfbox plan" data-action="plan">
    <div class="title"><span name="name"/></div>
    <div name="lifecycleStatus" class="status"/>
    <div name="validFor" use_template="period"/>
  </div>

  <div name="plan_summary_template" class="tmfbox plan">
    <div class="title"><span name="name"/></div>
    <div name="description" class="description"/>
    <div class="row">Status: <span name="lifecycleStatus"/></div>
    <div class="row">Valid: <span name="validFor" use_template="period"/></div>
    <div class="row">Offering: <span name="offeringId"/></div>
    <div class="row">Offering price: <span name="offeringPriceId"/></div>
    <div class="row">Contract: <span name="contractDurationLength"/>&#160;<span name="contractDurationPeriodType"/></div>
    <div class="row">Renewal: <span name="renewalTermLength"/>&#160;<span name="renewalTermPeriodType"/></div>
    <div name="price" use_template="price"/>
    <div class="actions">
      <button data-action="subscriptions">Subscriptions</button>
      <button data-action="raw-plan">Raw</button>
    </div>
  </div>

  <span name="period_template" class="period"><span name="startDateTime"/><span name="fromDate"/> &#8594; <span name="endDateTime"/><span name="toDate"/></span>

  <div name="price_template" class="price">
    <div class="title"><span name="name"/></div>
    <div class="row"><span name="percent"/><span name="amount"/>&#160;<span name="currency"/></div>
    <div class="row">Computed on: <span name="computationBase"/></div>
    <div name="prices" use_template="prices"/>
    <div name="discount" use_template="price"/>
  </div>

  <ul name="prices_template" class="prices"/>
  <li name="prices_item_template" class="price"><div name="name"/><div name="percent"/><div name="amount"/></li>

  <div name="subscription_short_summary_template" class="tmfbox subscription" data-action="statements">
    <div class="title"><span name="name"/></div>
    <div class="row">Status: <span name="status"/></div>
    <div class="row">Since: <span name="startDate"/></div>
    <div name="relatedParty" use_template="parties"/>
    <div class="actions">
      <button data-action="bills">Bills</button>
      <button data-action="customer-bills">Customer bills</button>
    </div>
  </div>

  <ul name="parties_template" class="parties"/>
  <li name="parties_item_template" class="party"><span name="name"/> (<span name="role"/>)</li>

  <div name="statement_short_summary_template" class="tmfbox statement">
    <div class="row"><span name="period" use_template="period"/></div>
    <div name="revenueItem" use_template="revenue_item"/>
  </div>

  <div name="revenue_item_template" class="revenue-item">
    <span name="name"/>: <span name="value"/>&#160;<span name="currency"/>
    <div name="items" use_template="revenue_items"/>
  </div>

  <ul name="revenue_items_template" class="revenue-items"/>
  <li name="revenue_items_item_template" class="revenue-item">
    <span name="name"/>: <span name="value"/>&#160;<span name="currency"/>
  </li>

  <div name="bill_short_summary_template" class="tmfbox bill" data-action="acbrs">
    <div class="row"><span name="period" use_template="period"/></div>
    <div class="row">Amount: <span name="amount"/></div>
    <div class="row">Estimated: <span name="estimated"/></div>
    <div name="revenueItems" use_template="revenue_items"/>
  </div>

  <div name="cb_summary_template" class="tmfbox customer-bill" data-action="acbrs">
    <div class="title"><span name="billNo"/></div>
    <div class="row">State: <span name="state"/></div>
    <div class="row">Billing date: <span name="billDate"/></div>
    <div class="row">Period: <span name="billingPeriod" use_template="period"/></div>
    <div class="row">Amount due: <span name="amountDue" use_template="money"/></div>
    <div class="row">Tax included: <span name="taxIncludedAmount" use_template="money"/></div>
    <div name="relatedParty" use_template="parties"/>
  </div>

  <span name="money_template" class="money"><span name="value"/>&#160;<span name="unit"/></span>

  <div name="acbr_short_summary_template" class="tmfbox acbr">
    <div class="row">Type: <span name="type"/></div>
    <div class="row">Date: <span name="date"/></div>
    <div class="row">Description: <span name="description"/></div>
    <div class="row">Amount: <span name="taxExcludedAmount" use_template="money"/></div>
    <div class="row">Product: <span name="product" use_template="ref"/></div>
  </div>

  <span name="ref_template" class="ref"><span name="name"/><span name="id"/></span>

  <div name="organization_template" class="tmfbox organization">
    <div class="title"><span name="tradingName"/><span name="name"/></div>
    <div class="row">Status: <span name="status"/></div>
    <div class="actions">
      <button data-action="transactions">Transactions</button>
      <button data-action="purchased-products">Purchased</button>
      <button data-action="sold-products">Sold</button>
    </div>
  </div>

  <div name="product_template" class="tmfbox product">
    <div class="title"><span name="name"/></div>
    <div class="row">Status: <span name="status"/></div>
    <div class="row">Start: <span name="startDate"/></div>
    <div class="row">Offering: <span name="productOffering" use_template="ref"/></div>
    <div name="relatedParty" use_template="parties"/>
  </div>
</templates>"#;
